//! Voice platform request and response envelopes

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::models::session::SessionAttributes;
use crate::utils::errors::{GeneraListError, Result};

pub const RESPONSE_VERSION: &str = "1.0";

/// Inbound event from the voice platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    pub session: PlatformSession,
    pub request: PlatformRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSession {
    /// True only for the first event of a conversation
    #[serde(rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    pub application: Application,
    /// Echo of the previous turn's `sessionAttributes`
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
    pub user: PlatformUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformUser {
    #[serde(alias = "id")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentPayload>,
    /// Why the platform ended the session, for `SessionEndedRequest`
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl IntentPayload {
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.value.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// The three request kinds the skill handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Launch => "LaunchRequest",
            RequestKind::Intent => "IntentRequest",
            RequestKind::SessionEnded => "SessionEndedRequest",
        }
    }
}

impl PlatformRequest {
    pub fn kind(&self) -> Result<RequestKind> {
        match self.request_type.as_str() {
            "LaunchRequest" | "Launch" => Ok(RequestKind::Launch),
            "IntentRequest" | "Intent" => Ok(RequestKind::Intent),
            "SessionEndedRequest" | "SessionEnded" => Ok(RequestKind::SessionEnded),
            other => Err(GeneraListError::UnsupportedRequest(other.to_string())),
        }
    }
}

/// Outbound envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

impl Card {
    pub fn simple(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: "Simple".to_string(),
            title: title.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    pub fn speech_text(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(|speech| speech.text.as_str())
    }

    pub fn reprompt_text(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|reprompt| reprompt.output_speech.text.as_str())
    }
}
