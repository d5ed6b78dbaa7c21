use async_trait::async_trait;
use jiff::Timestamp;
use shortwave_core::{
    Link, LinkReadStore, LinkStore, NewLink, NewUser, StorageError, User, UserId, UserStore,
};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

type Result<T> = std::result::Result<T, StorageError>;

/// SQLite implementation of the storage contracts.
///
/// Timestamps are stored as unix seconds. A unique index on
/// `short_value` backs the registrar's collision handling: a racing
/// insert of the same candidate fails with `Conflict` instead of
/// persisting a duplicate. Rows are never deleted; expiry is enforced
/// at read time by the resolver.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store from an existing SQLite connection pool.
    ///
    /// The schema is assumed to exist; use [`SqliteStore::connect`] to
    /// open and migrate in one step.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool, applies the schema, and returns the
    /// store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Opens a private in-memory database, for tests and smoke runs.
    ///
    /// The pool is pinned to a single connection: each SQLite
    /// in-memory connection is its own database.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(map_sqlx_error)?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_digest TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS short_links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                long_url TEXT NOT NULL,
                short_value TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users (id),
                CHECK (expires_at > created_at)
            )
            "#,
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_short_links_short_value
                ON short_links (short_value)
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_short_links_user_id
                ON short_links (user_id)
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        }

        Ok(())
    }
}

fn parse_timestamp(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StorageError::InvalidData(format!("invalid stored timestamp '{}': {e}", seconds))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed | sqlx::Error::Io(_) => {
            StorageError::Unavailable(message)
        }
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn link_from_row(row: &SqliteRow) -> Result<Link> {
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let expires_at: i64 = row.try_get("expires_at").map_err(map_sqlx_error)?;

    Ok(Link {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        long_url: row.try_get("long_url").map_err(map_sqlx_error)?,
        short_value: row.try_get("short_value").map_err(map_sqlx_error)?,
        created_at: parse_timestamp(created_at)?,
        expires_at: parse_timestamp(expires_at)?,
        user_id: row.try_get("user_id").map_err(map_sqlx_error)?,
    })
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(map_sqlx_error)?;

    Ok(User {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        username: row.try_get("username").map_err(map_sqlx_error)?,
        email: row.try_get("email").map_err(map_sqlx_error)?,
        password_digest: row.try_get("password_digest").map_err(map_sqlx_error)?,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
    })
}

const LINK_COLUMNS: &str = "id, long_url, short_value, created_at, expires_at, user_id";

#[async_trait]
impl LinkReadStore for SqliteStore {
    async fn find_by_code_suffix(&self, code: &str) -> Result<Option<Link>> {
        // substr with a negative start takes the trailing N characters.
        // LIKE would be simpler but folds ASCII case in SQLite, and
        // codes are case-sensitive.
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM short_links
            WHERE substr(short_value, -length(?)) = ?
            LIMIT 1
            "#
        );

        let row = sqlx::query(&sql)
            .bind(code)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Link>> {
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM short_links
            WHERE user_id = ?
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(link_from_row).collect()
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn insert(&self, link: NewLink) -> Result<Link> {
        if link.expires_at <= link.created_at {
            return Err(StorageError::InvalidData(format!(
                "expires_at must be later than created_at for '{}'",
                link.short_value
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO short_links (long_url, short_value, created_at, expires_at, user_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&link.long_url)
        .bind(&link.short_value)
        .bind(link.created_at.as_second())
        .bind(link.expires_at.as_second())
        .bind(link.user_id)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) if is_unique_violation(&err) => {
                return Err(StorageError::Conflict(link.short_value))
            }
            Err(err) => return Err(map_sqlx_error(err)),
        };

        Ok(Link {
            id: result.last_insert_rowid(),
            long_url: link.long_url,
            short_value: link.short_value,
            created_at: parse_timestamp(link.created_at.as_second())?,
            expires_at: parse_timestamp(link.expires_at.as_second())?,
            user_id: link.user_id,
        })
    }

    async fn find_by_short_value(&self, value: &str) -> Result<Option<Link>> {
        let sql = format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM short_links
            WHERE short_value = ?
            LIMIT 1
            "#
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }
}

const USER_COLUMNS: &str = "id, username, email, password_digest, created_at, updated_at";

#[async_trait]
impl UserStore for SqliteStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_digest, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_digest)
        .bind(user.created_at.as_second())
        .bind(user.updated_at.as_second())
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) if is_unique_violation(&err) => {
                return Err(StorageError::Conflict(user.username))
            }
            Err(err) => return Err(map_sqlx_error(err)),
        };

        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username,
            email: user.email,
            password_digest: user.password_digest,
            created_at: parse_timestamp(user.created_at.as_second())?,
            updated_at: parse_timestamp(user.updated_at.as_second())?,
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = ?
            LIMIT 1
            "#
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = ?
            LIMIT 1
            "#
        );

        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = ?
            LIMIT 1
            "#
        );

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(user_from_row).transpose()
    }
}
