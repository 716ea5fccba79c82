pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod scrape;
pub mod state;
pub mod store;
