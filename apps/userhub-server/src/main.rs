use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::EnvFilter;

use users::domain::service::{Service, ServiceConfig};
use users::infra::storage::migrations::Migrator;
use users::infra::storage::repo::SeaOrmUsersRepository;

mod config;
use config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "userhub-server", about = "User record management server")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port from the config file.
    #[arg(long)]
    port: Option<u16>,

    /// Increase log verbosity (-v = debug, -vv = trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    cfg.apply_cli_overrides(cli.port, cli.verbose);

    if cli.print_config {
        println!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    init_tracing(&cfg.logging.level);

    let mut opts = ConnectOptions::new(cfg.database.url.clone());
    if let Some(max) = cfg.database.max_conns {
        opts.max_connections(max);
    }
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database: {}", cfg.database.url))?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    // Composition root: build the repository and service once and pass
    // them to the transport layer by ownership.
    let repo = Arc::new(SeaOrmUsersRepository::new(db));
    let service = Arc::new(Service::new(repo, ServiceConfig::from(&cfg.users)));
    let app = users::api::rest::routes::router(service);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
