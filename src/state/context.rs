//! Application context
//!
//! Holds the settings and the two stores every turn works against. Built once
//! at startup and shared by reference across requests.

use std::sync::Arc;

use crate::config::{Settings, StorageBackend};
use crate::database::{create_pool, run_migrations, ListRepository, PoolConfig};
use crate::state::memory::{MemoryListStore, MemorySessionStore};
use crate::state::storage::SessionStorage;
use crate::state::store::{ListStore, SessionStore};
use crate::utils::errors::Result;

/// Application-wide context containing the stores and settings
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub lists: Arc<dyn ListStore>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppContext {
    /// Create an AppContext from already built stores
    pub fn new(settings: Settings, lists: Arc<dyn ListStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            settings,
            lists,
            sessions,
        }
    }

    /// Context backed by in-process stores
    pub fn in_memory(settings: Settings) -> Self {
        Self::new(
            settings,
            Arc::new(MemoryListStore::new()),
            Arc::new(MemorySessionStore::new()),
        )
    }

    /// Connect the stores selected in the settings
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        match settings.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory stores; lists and sessions are lost on restart");
                Ok(Self::in_memory(settings))
            }
            StorageBackend::PostgresRedis => {
                tracing::info!("Connecting to database...");
                let pool = create_pool(&PoolConfig::from(&settings.database)).await?;
                run_migrations(&pool).await?;

                tracing::info!("Connecting to Redis...");
                let sessions = SessionStorage::new(settings.redis.clone()).await?;
                sessions.test_connection().await?;

                Ok(Self::new(
                    settings,
                    Arc::new(ListRepository::new(pool)),
                    Arc::new(sessions),
                ))
            }
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("backend", &self.settings.storage.backend)
            .field("application_id", &self.settings.skill.application_id)
            .finish_non_exhaustive()
    }
}
