//! List store that fails selected operations

use async_trait::async_trait;
use GeneraList::models::UserList;
use GeneraList::state::{ListStore, MemoryListStore};
use GeneraList::utils::errors::{GeneraListError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOperation {
    Get,
    Put,
    UpdatePosition,
    Delete,
    ListNames,
}

/// In-memory list store whose `fail_on` operation always errors
#[derive(Debug)]
pub struct FailingListStore {
    inner: MemoryListStore,
    fail_on: ListOperation,
}

impl FailingListStore {
    pub fn new(fail_on: ListOperation) -> Self {
        Self {
            inner: MemoryListStore::new(),
            fail_on,
        }
    }

    /// Seed a list without going through the failing path
    pub async fn seed(&self, list: &UserList) {
        self.inner.put(list).await.expect("seeding memory store");
    }

    fn check(&self, operation: ListOperation) -> Result<()> {
        if operation == self.fail_on {
            Err(GeneraListError::StoreUnavailable(format!("{:?} is down", operation)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ListStore for FailingListStore {
    async fn get(&self, user_id: &str, list_name: &str) -> Result<Option<UserList>> {
        self.check(ListOperation::Get)?;
        self.inner.get(user_id, list_name).await
    }

    async fn put(&self, list: &UserList) -> Result<()> {
        self.check(ListOperation::Put)?;
        self.inner.put(list).await
    }

    async fn update_position(&self, user_id: &str, list_name: &str, current_step: u32) -> Result<()> {
        self.check(ListOperation::UpdatePosition)?;
        self.inner.update_position(user_id, list_name, current_step).await
    }

    async fn delete(&self, user_id: &str, list_name: &str) -> Result<bool> {
        self.check(ListOperation::Delete)?;
        self.inner.delete(user_id, list_name).await
    }

    async fn list_names(&self, user_id: &str) -> Result<Vec<String>> {
        self.check(ListOperation::ListNames)?;
        self.inner.list_names(user_id).await
    }
}
