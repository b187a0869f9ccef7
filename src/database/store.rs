use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::book::{Book, BookUpdate, NewBook};

/// Errors surfaced by a [`BookStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book with isbn {0} already exists")]
    DuplicateKey(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// CRUD over the single `books` table, keyed by isbn.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new book. Fails with [`StoreError::DuplicateKey`] when the isbn is taken.
    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;

    /// All books ordered by case-insensitive title, then isbn.
    async fn get_all(&self) -> Result<Vec<Book>, StoreError>;

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError>;

    /// Apply the present fields of `changes` over the stored record.
    async fn update(&self, isbn: &str, changes: BookUpdate) -> Result<Book, StoreError>;

    /// Delete the row and return the removed isbn.
    async fn remove(&self, isbn: &str) -> Result<String, StoreError>;

    /// Cheap liveness probe for `/health`.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release held resources on shutdown.
    async fn close(&self) {}
}
