pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod middleware;
pub mod schema;
pub mod server;
pub mod state;

#[cfg(test)]
pub mod testing;
