//! State management module
//!
//! This module holds the session state machine and the stores it reads and
//! writes through

pub mod context;
pub mod intent;
pub mod machine;
pub mod memory;
pub mod storage;
pub mod store;


// Re-export commonly used state components
pub use context::AppContext;
pub use intent::Intent;
pub use machine::{launch, required_lookup, transition, Effect, Fetched, ListAction, Lookup, Reply, Transition};
pub use memory::{MemoryListStore, MemorySessionStore};
pub use storage::SessionStorage;
pub use store::{ListStore, SessionStore};
