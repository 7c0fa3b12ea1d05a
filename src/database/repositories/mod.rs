//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod list;

// Re-export repositories
pub use list::{ListRepository, ListRow};
