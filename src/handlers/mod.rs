//! Request handlers module
//!
//! This module turns platform envelopes into responses:
//! - `dispatcher` runs one turn against the stores and the state machine
//! - `speech` renders replies into the response envelope
//! - `http` exposes the dispatcher over axum

pub mod dispatcher;
pub mod http;
pub mod speech;

// Re-export commonly used handler components
pub use dispatcher::Dispatcher;
pub use http::{create_router, shutdown_signal};
pub use speech::SpeechRenderer;
