use axum::extract::{Path, State};

use crate::database::models::{BookUpdate, NewBook};
use crate::error::ApiError;
use crate::extractor::ValidJson;
use crate::middleware::{ApiResponse, ApiResult, BookEnvelope, BooksEnvelope, MessageEnvelope};
use crate::state::AppState;

/// POST /books - Create a book from a full, schema-valid payload
pub async fn create(
    State(state): State<AppState>,
    ValidJson(book): ValidJson<NewBook>,
) -> ApiResult<BookEnvelope> {
    let book = state.store.create(book).await?;
    tracing::info!(isbn = %book.isbn, "Created book");
    Ok(ApiResponse::created(BookEnvelope { book }))
}

/// GET /books - List every book ordered by title
pub async fn list(State(state): State<AppState>) -> ApiResult<BooksEnvelope> {
    let books = state.store.get_all().await?;
    Ok(ApiResponse::success(BooksEnvelope { books }))
}

/// GET /books/:isbn - Fetch one book
pub async fn get(
    Path(isbn): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<BookEnvelope> {
    let book = state.store.get_by_isbn(&isbn).await?;
    Ok(ApiResponse::success(BookEnvelope { book }))
}

/// PUT /books/:isbn - Overwrite the given fields of an existing book
pub async fn update(
    Path(isbn): Path<String>,
    State(state): State<AppState>,
    ValidJson(changes): ValidJson<BookUpdate>,
) -> ApiResult<BookEnvelope> {
    // isbn is immutable; clients may only echo the current one back
    if let Some(body_isbn) = changes.isbn.as_deref() {
        if body_isbn != isbn {
            return Err(ApiError::validation_error(vec![format!(
                "instance.isbn \"{}\" does not match the isbn in the path \"{}\"",
                body_isbn, isbn
            )]));
        }
    }

    let book = state.store.update(&isbn, changes).await?;
    tracing::info!(isbn = %book.isbn, "Updated book");
    Ok(ApiResponse::success(BookEnvelope { book }))
}

/// DELETE /books/:isbn - Remove a book
pub async fn delete(
    Path(isbn): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<MessageEnvelope> {
    let removed = state.store.remove(&isbn).await?;
    tracing::info!(isbn = %removed, "Deleted book");
    Ok(ApiResponse::success(MessageEnvelope {
        message: "Book deleted",
    }))
}
