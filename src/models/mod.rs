//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod envelope;
pub mod list;
pub mod session;

// Re-export commonly used models
pub use envelope::{RequestEnvelope, ResponseEnvelope, RequestKind, IntentPayload, ResponseBody, OutputSpeech, Card, Reprompt};
pub use list::UserList;
pub use session::{Session, SessionAttributes, SessionPatch, Activity, Task};
