//! Middleware module
//!
//! This module contains the checks and logging wrapped around every turn

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::AuthMiddleware;
pub use logging::{LoggingMiddleware, TurnTimer};
