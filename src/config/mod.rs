/// Database configuration and connection management
pub mod database;

/// Reference-data catalog loading from catalog.toml
pub mod catalog;
