//! Redis session storage
//!
//! Each session is a Redis hash at `{prefix}session:{user_id}` holding the
//! text fields of `SessionAttributes`. Sessions never expire: the core keeps
//! them for the lifetime of the user.

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use tracing::{debug, error};
use crate::config::RedisConfig;
use crate::models::{Session, SessionAttributes, SessionPatch};
use crate::state::store::SessionStore;
use crate::utils::errors::Result;

const FIELD_UPDATED_AT: &str = "updatedAt";

/// Redis-based session storage
#[derive(Clone)]
pub struct SessionStorage {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Redis configuration
    config: RedisConfig,
}

impl SessionStorage {
    /// Create a new session storage instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Get the Redis key for a user's session
    fn session_key(&self, user_id: &str) -> String {
        format!("{}session:{}", self.config.prefix, user_id)
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

fn touched(mut fields: Vec<(String, String)>) -> Vec<(String, String)> {
    fields.push((FIELD_UPDATED_AT.to_string(), Utc::now().to_rfc3339()));
    fields
}

#[async_trait]
impl SessionStore for SessionStorage {
    async fn get(&self, user_id: &str) -> Result<Option<Session>> {
        let key = self.session_key(user_id);
        debug!(user_id = user_id, key = %key, "Loading session from Redis");

        let mut conn = self.connection_manager.clone();
        let fields: HashMap<String, String> = match conn.hgetall(&key).await {
            Ok(fields) => fields,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to get session from Redis");
                return Err(e.into());
            }
        };

        if fields.is_empty() {
            debug!(user_id = user_id, "No session found in Redis");
            return Ok(None);
        }

        let attributes = SessionAttributes::from_fields(&fields)?;
        let session = Session::from_attributes(user_id, &attributes)?;
        debug!(user_id = user_id, task = session.task_label(), list = ?session.current_list(),
               step = session.current_step, "Session loaded successfully");
        Ok(Some(session))
    }

    async fn put(&self, session: &Session) -> Result<()> {
        let key = self.session_key(&session.user_id);
        let fields = touched(session.to_attributes().to_fields()?);
        debug!(user_id = %session.user_id, key = %key, task = session.task_label(),
               step = session.current_step, "Saving session to Redis");

        let mut conn = self.connection_manager.clone();
        // Replace the whole hash so fields of a previous task do not linger
        let result: redis::RedisResult<()> = redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, fields.as_slice())
            .ignore()
            .query_async(&mut conn)
            .await;

        if let Err(e) = result {
            error!(user_id = %session.user_id, error = %e, "Failed to save session to Redis");
            return Err(e.into());
        }
        Ok(())
    }

    async fn update(&self, user_id: &str, patch: &SessionPatch) -> Result<bool> {
        let key = self.session_key(user_id);
        let mut conn = self.connection_manager.clone();

        let exists: bool = conn.exists(&key).await?;
        if !exists {
            debug!(user_id = user_id, "No session to update");
            return Ok(false);
        }

        let fields = touched(patch.to_fields());
        conn.hset_multiple::<_, _, _, ()>(&key, fields.as_slice()).await?;
        debug!(user_id = user_id, step = ?patch.current_step, "Session updated in Redis");
        Ok(true)
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        let key = self.session_key(user_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(user_id = user_id, deleted = deleted > 0, "Session deletion attempted");
        Ok(deleted > 0)
    }
}

impl std::fmt::Debug for SessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
