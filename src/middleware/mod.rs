pub mod not_found;
pub mod response;

pub use not_found::not_found;
pub use response::{ApiResponse, ApiResult, BookEnvelope, BooksEnvelope, MessageEnvelope};
