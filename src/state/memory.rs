//! In-process store implementations
//!
//! Used by the `memory` storage backend and by tests. The session store keeps
//! the same flat text fields the Redis store writes, so records go through the
//! same boundary conversion either way.

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use crate::models::{Session, SessionAttributes, SessionPatch, UserList};
use crate::state::store::{ListStore, SessionStore};
use crate::utils::errors::{GeneraListError, Result};

/// List store held in memory
#[derive(Debug, Default)]
pub struct MemoryListStore {
    lists: RwLock<HashMap<(String, String), UserList>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored lists across all users
    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lists.read().await.is_empty()
    }
}

fn list_key(user_id: &str, list_name: &str) -> (String, String) {
    (user_id.to_string(), list_name.to_string())
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn get(&self, user_id: &str, list_name: &str) -> Result<Option<UserList>> {
        Ok(self.lists.read().await.get(&list_key(user_id, list_name)).cloned())
    }

    async fn put(&self, list: &UserList) -> Result<()> {
        debug!(user_id = %list.user_id, list_name = %list.name, steps = list.number_of_steps(), "Storing list in memory");
        self.lists
            .write()
            .await
            .insert(list_key(&list.user_id, &list.name), list.clone());
        Ok(())
    }

    async fn update_position(&self, user_id: &str, list_name: &str, current_step: u32) -> Result<()> {
        let mut lists = self.lists.write().await;
        let list = lists.get_mut(&list_key(user_id, list_name)).ok_or_else(|| {
            GeneraListError::InvalidRecord(format!("no list {:?} to update", list_name))
        })?;
        if current_step > list.number_of_steps() {
            return Err(GeneraListError::InvalidRecord(format!(
                "step {} is past the end of {:?}",
                current_step, list_name
            )));
        }
        list.current_step = current_step;
        Ok(())
    }

    async fn delete(&self, user_id: &str, list_name: &str) -> Result<bool> {
        Ok(self.lists.write().await.remove(&list_key(user_id, list_name)).is_some())
    }

    async fn list_names(&self, user_id: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .lists
            .read()
            .await
            .keys()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Session store held in memory as flat text fields
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored fields, for inspection
    pub async fn raw_fields(&self, user_id: &str) -> Option<HashMap<String, String>> {
        self.sessions.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        match sessions.get(user_id) {
            Some(fields) => {
                let attributes = SessionAttributes::from_fields(fields)?;
                Ok(Some(Session::from_attributes(user_id, &attributes)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, session: &Session) -> Result<()> {
        let fields = session.to_attributes().to_fields()?.into_iter().collect();
        self.sessions
            .write()
            .await
            .insert(session.user_id.clone(), fields);
        Ok(())
    }

    async fn update(&self, user_id: &str, patch: &SessionPatch) -> Result<bool> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(user_id) {
            Some(fields) => {
                fields.extend(patch.to_fields());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        Ok(self.sessions.write().await.remove(user_id).is_some())
    }
}
