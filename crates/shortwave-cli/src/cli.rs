use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};

pub const BASE_URL_ENV: &str = "SHORTWAVE_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SHORTWAVE_STORAGE_BACKEND";
pub const SQLITE_URL_ENV: &str = "SHORTWAVE_SQLITE_URL";

pub const DEFAULT_BASE_URL: &str = "localhost:8000";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://shortwave.db?mode=rwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortwave")]
pub struct Cli {
    /// Host prefix baked into stored short values.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_URL_ENV, default_value = DEFAULT_SQLITE_URL)]
    pub sqlite_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a short link for a long URL.
    Shorten {
        long_url: String,
        /// Owner username; created on first use.
        #[arg(long)]
        owner: String,
    },
    /// Resolve a short code to its target URL.
    Resolve { code: String },
    /// List the short links owned by a user.
    List {
        #[arg(long)]
        owner: String,
    },
}
