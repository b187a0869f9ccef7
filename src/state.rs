use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::{BookStore, DatabaseManager, MemoryBookStore, PgBookStore};
use crate::schema::BookValidator;

/// Shared per-request state: the book store and the compiled schemas
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
    pub validator: Arc<BookValidator>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>, validator: Arc<BookValidator>) -> Self {
        Self { store, validator }
    }

    /// State over a fresh in-memory store
    pub fn in_memory() -> anyhow::Result<Self> {
        let validator = BookValidator::new().context("Failed to compile book schemas")?;
        Ok(Self::new(Arc::new(MemoryBookStore::new()), Arc::new(validator)))
    }

    /// Build state from configuration. Falls back to the in-memory store when
    /// `force_memory` is set or no database URL is configured.
    pub async fn from_config(config: &AppConfig, force_memory: bool) -> anyhow::Result<Self> {
        if force_memory {
            info!("In-memory store requested; data will not survive restarts");
            return Self::in_memory();
        }

        if config.database.url.is_none() {
            warn!("DATABASE_URL not set; running on the in-memory store. Data will not survive restarts.");
            return Self::in_memory();
        }

        let pool = DatabaseManager::connect(&config.database, config.environment)
            .await
            .context("Failed to connect to PostgreSQL")?;
        let store = PgBookStore::new(pool);

        if config.database.run_migrations {
            store.migrate().await.context("Failed to apply migrations")?;
        }

        let validator = BookValidator::new().context("Failed to compile book schemas")?;
        Ok(Self::new(Arc::new(store), Arc::new(validator)))
    }
}
