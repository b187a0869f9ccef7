// handlers/mod.rs - route handlers
//
// books: the five CRUD routes over /books
// root:  service info and health probe
pub mod books;
pub mod root;

pub use root::{health, root};
