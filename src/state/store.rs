//! Store access contracts
//!
//! Every operation touches one key and is expected to read its own writes.
//! Callers never assume atomicity across keys or across the two stores.

use std::sync::Arc;
use async_trait::async_trait;
use crate::models::{Session, SessionPatch, UserList};
use crate::utils::errors::Result;

/// Named lists keyed by (user, list name)
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn get(&self, user_id: &str, list_name: &str) -> Result<Option<UserList>>;

    /// Insert or replace the whole record
    async fn put(&self, list: &UserList) -> Result<()>;

    /// Move the persisted playback position. Fails if the list is gone or
    /// the step is past its end.
    async fn update_position(&self, user_id: &str, list_name: &str, current_step: u32) -> Result<()>;

    /// Returns whether a record was removed
    async fn delete(&self, user_id: &str, list_name: &str) -> Result<bool>;

    /// Names of every list the user owns, sorted
    async fn list_names(&self, user_id: &str) -> Result<Vec<String>>;
}

/// Per-user session records keyed by user id
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<Session>>;

    /// Insert or replace the whole record
    async fn put(&self, session: &Session) -> Result<()>;

    /// Apply a partial update. Returns false, writing nothing, when there is
    /// no record to update.
    async fn update(&self, user_id: &str, patch: &SessionPatch) -> Result<bool>;

    /// Returns whether a record was removed
    async fn delete(&self, user_id: &str) -> Result<bool>;
}

#[async_trait]
impl<T: ListStore + ?Sized> ListStore for Arc<T> {
    async fn get(&self, user_id: &str, list_name: &str) -> Result<Option<UserList>> {
        (**self).get(user_id, list_name).await
    }

    async fn put(&self, list: &UserList) -> Result<()> {
        (**self).put(list).await
    }

    async fn update_position(&self, user_id: &str, list_name: &str, current_step: u32) -> Result<()> {
        (**self).update_position(user_id, list_name, current_step).await
    }

    async fn delete(&self, user_id: &str, list_name: &str) -> Result<bool> {
        (**self).delete(user_id, list_name).await
    }

    async fn list_names(&self, user_id: &str) -> Result<Vec<String>> {
        (**self).list_names(user_id).await
    }
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get(&self, user_id: &str) -> Result<Option<Session>> {
        (**self).get(user_id).await
    }

    async fn put(&self, session: &Session) -> Result<()> {
        (**self).put(session).await
    }

    async fn update(&self, user_id: &str, patch: &SessionPatch) -> Result<bool> {
        (**self).update(user_id, patch).await
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        (**self).delete(user_id).await
    }
}
