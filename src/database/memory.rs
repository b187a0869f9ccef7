use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::database::models::book::{Book, BookUpdate, NewBook};
use crate::database::store::{BookStore, StoreError};

/// In-process book store used when no database is configured.
///
/// Keyed by isbn, so uniqueness holds the same way the primary key enforces it in Postgres.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<String, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.isbn) {
            return Err(StoreError::DuplicateKey(book.isbn));
        }
        let book = Book::from(book);
        books.insert(book.isbn.clone(), book.clone());
        debug!(isbn = %book.isbn, "Inserted book (memory)");
        Ok(book)
    }

    async fn get_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().await;
        let mut all: Vec<Book> = books.values().cloned().collect();
        // same key as `ORDER BY lower(title) COLLATE "C", isbn`
        all.sort_by_cached_key(|b| (b.title.to_lowercase(), b.isbn.clone()));
        Ok(all)
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Book, StoreError> {
        self.books
            .read()
            .await
            .get(isbn)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))
    }

    async fn update(&self, isbn: &str, changes: BookUpdate) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;
        let book = books
            .get_mut(isbn)
            .ok_or_else(|| StoreError::NotFound(isbn.to_string()))?;
        book.apply(changes);
        debug!(%isbn, "Updated book (memory)");
        Ok(book.clone())
    }

    async fn remove(&self, isbn: &str) -> Result<String, StoreError> {
        match self.books.write().await.remove(isbn) {
            Some(book) => {
                debug!(%isbn, "Deleted book (memory)");
                Ok(book.isbn)
            }
            None => Err(StoreError::NotFound(isbn.to_string())),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
