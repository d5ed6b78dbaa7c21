mod cli;

use crate::cli::{Cli, Command, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use jiff::Timestamp;
use shortwave_core::{LinkStore, NewUser, ServiceConfig, User, UserStore};
use shortwave_generator::RandomGenerator;
use shortwave_registrar::RegistrarService;
use shortwave_resolver::ResolverService;
use shortwave_storage::{InMemoryStore, SqliteStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!(
        base_url = %cli.base_url,
        storage_backend = %cli.storage,
        "starting shortwave cli"
    );

    let config = ServiceConfig::builder().base_url(cli.base_url.clone()).build();

    match cli.storage {
        StorageBackendArg::InMemory => run(InMemoryStore::new(), cli, config).await,
        StorageBackendArg::Sqlite => {
            let store = SqliteStore::connect(&cli.sqlite_url)
                .await
                .context("open sqlite store")?;
            run(store, cli, config).await
        }
    }
}

async fn run<S>(store: S, cli: Cli, config: ServiceConfig) -> anyhow::Result<()>
where
    S: LinkStore + UserStore + Clone,
{
    let registrar = RegistrarService::new(store.clone(), RandomGenerator::new(), config);
    let resolver = ResolverService::new(store.clone());

    match cli.command {
        Command::Shorten { long_url, owner } => {
            let owner = ensure_owner(&store, &owner).await?;
            let link = registrar.create_short_link(&long_url, owner.id).await?;
            println!("{}", link.short_value);
        }
        Command::Resolve { code } => {
            let url = resolver.resolve(&code).await?;
            println!("{url}");
        }
        Command::List { owner } => {
            let owner = ensure_owner(&store, &owner).await?;
            for link in registrar.list_links(owner.id).await? {
                println!(
                    "{}\t{}\texpires {}",
                    link.short_value, link.long_url, link.expires_at
                );
            }
        }
    }

    Ok(())
}

/// Looks up the owner by username, creating the record on first use.
///
/// CLI-created users carry the locked digest `!` and cannot log in
/// through the accounts service.
async fn ensure_owner<S: UserStore>(store: &S, username: &str) -> anyhow::Result<User> {
    if let Some(user) = store.find_by_username(username).await? {
        return Ok(user);
    }

    let email = format!("{username}@shortwave.local");
    let user = store
        .insert(NewUser::at(username, email, "!", Timestamp::now()))
        .await
        .context("create owner user")?;

    info!(username, id = user.id, "created owner user");
    Ok(user)
}
