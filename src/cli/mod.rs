use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgBookStore};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "books-api")]
#[command(about = "REST API for book records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Address to bind (overrides API_HOST)")]
        host: Option<String>,

        #[arg(long, help = "Port to bind (overrides API_PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Use the in-memory store even if DATABASE_URL is set")]
        memory: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            host: None,
            port: None,
            memory: false,
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or_default() {
        Commands::Serve { host, port, memory } => {
            let host = host.unwrap_or_else(|| config.api.host.clone());
            let port = port.unwrap_or(config.api.port);
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("invalid bind address {}:{}", host, port))?;

            let state = AppState::from_config(config, memory).await?;
            crate::server::run(state, config, addr).await
        }
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database, config.environment)
                .await
                .context("Failed to connect to PostgreSQL")?;
            let store = PgBookStore::new(pool);
            store.migrate().await.context("Failed to apply migrations")?;
            store.pool().close().await;
            println!("Migrations applied");
            Ok(())
        }
    }
}
