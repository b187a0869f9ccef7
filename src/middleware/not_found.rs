use axum::http::Uri;

use crate::error::ApiError;

/// Router fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(%uri, "No route matched");
    ApiError::not_found("Not Found")
}
