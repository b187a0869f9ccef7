use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::models::book::{Book, BookUpdate, NewBook};
use crate::database::store::{BookStore, StoreError};

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

/// Book store backed by the `books` table in PostgreSQL
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations (creates the `books` table)
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let sql = format!(
            "INSERT INTO books ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {cols}",
            cols = BOOK_COLUMNS
        );

        let result = sqlx::query_as::<_, Book>(&sql)
            .bind(&book.isbn)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(created) => {
                debug!(isbn = %created.isbn, "Inserted book");
                Ok(created)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(isbn = %book.isbn, "Duplicate isbn on insert");
                Err(StoreError::DuplicateKey(book.isbn))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let sql = format!("SELECT {} FROM books ORDER BY lower(title) COLLATE \"C\", isbn", BOOK_COLUMNS);
        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        debug!(count = books.len(), "Selected books");
        Ok(books)
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        let sql = format!("SELECT {} FROM books WHERE isbn = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn update(&self, isbn: &str, changes: BookUpdate) -> Result<Book, StoreError> {
        // NULL binds leave the stored column as is
        let sql = format!(
            "UPDATE books SET
                amazon_url = COALESCE($2, amazon_url),
                author = COALESCE($3, author),
                language = COALESCE($4, language),
                pages = COALESCE($5, pages),
                publisher = COALESCE($6, publisher),
                title = COALESCE($7, title),
                year = COALESCE($8, year)
             WHERE isbn = $1
             RETURNING {}",
            BOOK_COLUMNS
        );

        let updated = sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .bind(changes.amazon_url)
            .bind(changes.author)
            .bind(changes.language)
            .bind(changes.pages)
            .bind(changes.publisher)
            .bind(changes.title)
            .bind(changes.year)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))?;

        debug!(isbn = %updated.isbn, "Updated book");
        Ok(updated)
    }

    async fn remove(&self, isbn: &str) -> Result<String, StoreError> {
        let deleted: Option<String> =
            sqlx::query_scalar("DELETE FROM books WHERE isbn = $1 RETURNING isbn")
                .bind(isbn)
                .fetch_optional(&self.pool)
                .await?;

        match deleted {
            Some(isbn) => {
                debug!(%isbn, "Deleted book");
                Ok(isbn)
            }
            None => Err(StoreError::NotFound(isbn.to_string())),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
