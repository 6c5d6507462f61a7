pub mod app;
pub mod authz;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod pqrs;
pub mod reports;
pub mod seed;
pub mod utils;
pub mod views;

// Re-export commonly used items for tests
pub use app::{create_app, App};
pub use config::AppConfig;
