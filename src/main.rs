use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use books_api::cli::Cli;

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    // config already folds RUST_LOG into the filter
    let filter = EnvFilter::try_new(filter).context("Invalid log filter")?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt::Subscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .context("Failed to set global tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = books_api::config::config();
    init_tracing(&config.api.log_filter)?;
    tracing::info!("Starting Books API in {:?} mode", config.environment);

    let cli = Cli::parse();
    books_api::cli::run(cli, config).await
}
