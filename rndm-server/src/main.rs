use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rndm_core::{AppUnitOfWork, PostgresDatabase, search::SearchAdapter};
use rndm_server::{AppState, Config, create_app};

#[derive(Debug, Parser)]
#[command(name = "rndm-server", about = "RNDM social media log server", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "RNDM_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if config.database.url.is_empty() {
        anyhow::bail!(
            "No database URL configured; set DATABASE_URL or [database].url"
        );
    }

    let db = PostgresDatabase::new(&config.database.url).await?;
    db.initialize_schema().await?;
    info!("Database schema is up to date");

    let unit_of_work = AppUnitOfWork::from_postgres(&db);
    let search = SearchAdapter::new(config.search.clone())?;

    let addr: SocketAddr =
        format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("invalid listen address")?;

    let state = AppState {
        unit_of_work: Arc::new(unit_of_work),
        search: Arc::new(search),
        config: Arc::new(config),
    };

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("RNDM server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install shutdown signal handler");
        return;
    }
    info!("Shutdown signal received");
}
