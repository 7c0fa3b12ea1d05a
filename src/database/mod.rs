//! Database module
//!
//! This module handles the Postgres connection and the list table

pub mod connection;
pub mod repositories;

// Re-export commonly used database components
pub use connection::{DatabasePool, PoolConfig, create_pool, ping, run_migrations};
pub use repositories::ListRepository;
