//! Test context for dispatcher-level tests
//!
//! Wires a `Dispatcher` to in-memory stores and keeps typed handles on them so
//! tests can inspect what a turn wrote. `Conversation` plays the platform's
//! part: it echoes `sessionAttributes` back on every turn and starts a new
//! session after one ends.

use std::sync::Arc;

use serde_json::Value;
use GeneraList::config::{Settings, StorageBackend};
use GeneraList::models::{ResponseEnvelope, UserList};
use GeneraList::state::{AppContext, ListStore, MemoryListStore, MemorySessionStore};
use GeneraList::utils::errors::Result;
use GeneraList::Dispatcher;

use super::test_data::{envelope_json, parse_envelope, TEST_APPLICATION_ID};

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.skill.application_id = TEST_APPLICATION_ID.to_string();
    settings.storage.backend = StorageBackend::Memory;
    settings
}

/// Dispatcher over in-memory stores
pub struct TestContext {
    pub dispatcher: Dispatcher,
    pub lists: Arc<MemoryListStore>,
    pub sessions: Arc<MemorySessionStore>,
}

impl TestContext {
    pub fn new() -> Self {
        let lists = Arc::new(MemoryListStore::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let ctx = AppContext::new(test_settings(), lists.clone(), sessions.clone());

        Self {
            dispatcher: Dispatcher::new(ctx),
            lists,
            sessions,
        }
    }

    /// Context whose list store is replaced, e.g. by a failing one
    pub fn with_list_store(list_store: Arc<dyn ListStore>) -> Self {
        let sessions = Arc::new(MemorySessionStore::new());
        let ctx = AppContext::new(test_settings(), list_store, sessions.clone());

        Self {
            dispatcher: Dispatcher::new(ctx),
            lists: Arc::new(MemoryListStore::new()),
            sessions,
        }
    }

    pub fn conversation(&self, user_id: &str) -> Conversation<'_> {
        Conversation {
            ctx: self,
            user_id: user_id.to_string(),
            attributes: None,
            is_new: true,
        }
    }

    pub async fn stored_list(&self, user_id: &str, name: &str) -> Option<UserList> {
        self.lists.get(user_id, name).await.expect("memory store get")
    }

    pub async fn seed_list(&self, user_id: &str, name: &str, items: &[&str]) {
        let list = UserList::new(user_id, name).with_items(items.iter().map(|i| i.to_string()).collect());
        self.lists.put(&list).await.expect("memory store put");
    }
}

/// One user's exchange with the skill, as the platform would drive it
pub struct Conversation<'a> {
    ctx: &'a TestContext,
    pub user_id: String,
    pub attributes: Option<Value>,
    pub is_new: bool,
}

impl Conversation<'_> {
    /// Send a request and track the session the way the platform does
    pub async fn try_send(&mut self, request: Value) -> Result<ResponseEnvelope> {
        let envelope = parse_envelope(envelope_json(
            &self.user_id,
            self.is_new,
            self.attributes.clone(),
            request,
        ));
        let response = self.ctx.dispatcher.handle(envelope).await?;

        if response.response.should_end_session {
            self.is_new = true;
            self.attributes = None;
        } else {
            self.is_new = false;
            self.attributes = Some(serde_json::to_value(&response.session_attributes).expect("attributes serialize"));
        }
        Ok(response)
    }

    pub async fn send(&mut self, request: Value) -> ResponseEnvelope {
        self.try_send(request).await.expect("turn should succeed")
    }

    /// Send and return only the spoken text
    pub async fn say(&mut self, request: Value) -> String {
        self.send(request)
            .await
            .speech_text()
            .unwrap_or_default()
            .to_string()
    }
}
