pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;
pub use store::{BookStore, StoreError};
