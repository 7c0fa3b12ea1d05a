//! Authentication middleware
//!
//! Every envelope names the skill it was sent to and the user who spoke.
//! Requests addressed to another skill, or without a user, are refused before
//! any state is touched.

use tracing::{debug, warn};
use crate::config::SkillConfig;
use crate::models::RequestEnvelope;
use crate::utils::errors::{GeneraListError, Result};

/// Authentication middleware
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    application_id: String,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(skill: &SkillConfig) -> Self {
        Self {
            application_id: skill.application_id.clone(),
        }
    }

    /// Check that the envelope is addressed to this skill and names a user
    pub fn verify(&self, envelope: &RequestEnvelope) -> Result<()> {
        let actual = &envelope.session.application.application_id;
        if *actual != self.application_id {
            warn!(
                expected = %self.application_id,
                actual = %actual,
                "Request for another application rejected"
            );
            return Err(GeneraListError::InvalidApplication {
                expected: self.application_id.clone(),
                actual: actual.clone(),
            });
        }

        let user_id = envelope.session.user.user_id.trim();
        if user_id.is_empty() {
            warn!("Request without a user id rejected");
            return Err(GeneraListError::InvalidInput("missing user id".to_string()));
        }

        debug!(user_id = user_id, "Request authenticated");
        Ok(())
    }
}
