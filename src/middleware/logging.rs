//! Logging middleware
//!
//! Logs inbound envelopes and times each turn end to end.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn, Span};
use crate::models::RequestEnvelope;
use crate::utils::errors::{ErrorSeverity, GeneraListError};

/// Turns slower than this are reported
const SLOW_TURN: Duration = Duration::from_millis(1000);

/// Logging middleware for skill requests
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_requests: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_requests: bool, log_performance: bool) -> Self {
        Self {
            log_requests,
            log_performance,
        }
    }

    /// Log an inbound envelope
    pub fn log_request(&self, envelope: &RequestEnvelope) {
        if !self.log_requests {
            return;
        }

        let request = &envelope.request;
        debug!(
            user_id = %envelope.session.user.user_id,
            session_id = envelope.session.session_id.as_deref().unwrap_or("none"),
            new_session = envelope.session.is_new,
            request_type = %request.request_type,
            request_id = request.request_id.as_deref().unwrap_or("none"),
            intent = request.intent.as_ref().map(|intent| intent.name.as_str()),
            reason = request.reason.as_deref(),
            "Request received"
        );
    }

    /// Log an error that escaped the dispatcher
    pub fn log_error(&self, error: &GeneraListError, user_id: &str) {
        match error.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(user_id = user_id, error = %error, "Request failed")
            }
            ErrorSeverity::Warning => warn!(user_id = user_id, error = %error, "Request rejected"),
            ErrorSeverity::Info => info!(user_id = user_id, error = %error, "Request rejected"),
        }
    }

    /// Start timing a turn
    pub fn track_turn(&self, user_id: &str) -> Option<TurnTimer> {
        self.log_performance.then(|| TurnTimer::new(user_id))
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Measures how long one turn takes
pub struct TurnTimer {
    user_id: String,
    start_time: Instant,
    _span: Span,
}

impl TurnTimer {
    fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            start_time: Instant::now(),
            _span: tracing::info_span!("turn", user_id = %user_id),
        }
    }

    /// Finish timing and log the result
    pub fn complete(self, success: bool) -> Duration {
        let duration = self.start_time.elapsed();
        let duration_ms = duration.as_millis();

        if success {
            debug!(user_id = %self.user_id, duration_ms = duration_ms, "Turn completed");
        } else {
            warn!(user_id = %self.user_id, duration_ms = duration_ms, "Turn failed");
        }
        if duration > SLOW_TURN {
            warn!(user_id = %self.user_id, duration_ms = duration_ms, "Slow turn detected");
        }

        duration
    }
}
