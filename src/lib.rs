//! GeneraList skill backend
//!
//! A voice assistant skill for building named lists and playing them back one
//! step at a time. This library provides the session state machine, the list
//! and session stores, and the HTTP endpoint the voice platform calls.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GeneraListError, Result};

// Re-export main components for easy access
pub use handlers::Dispatcher;
pub use state::AppContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
