//! List repository implementation

use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use sqlx::types::Json;
use crate::models::list::{items_to_step_map, step_map_to_items, UserList};
use crate::state::store::ListStore;
use crate::utils::errors::{GeneraListError, Result};
use crate::utils::logging::log_list_write;

/// Row of the `lists` table
#[derive(Debug, Clone, FromRow)]
pub struct ListRow {
    pub user_id: String,
    pub list_name: String,
    pub items: Json<BTreeMap<String, String>>,
    pub number_of_steps: i32,
    pub current_step: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ListRow> for UserList {
    type Error = GeneraListError;

    fn try_from(row: ListRow) -> Result<Self> {
        let items = step_map_to_items(&row.items.0)?;

        if row.number_of_steps < 0 || row.number_of_steps as usize != items.len() {
            return Err(GeneraListError::InvalidRecord(format!(
                "list {:?} has number_of_steps {} but {} items",
                row.list_name,
                row.number_of_steps,
                items.len()
            )));
        }
        let current_step = u32::try_from(row.current_step).map_err(|_| {
            GeneraListError::InvalidRecord(format!("list {:?} has negative current_step", row.list_name))
        })?;
        if current_step as usize > items.len() {
            return Err(GeneraListError::InvalidRecord(format!(
                "list {:?} has current_step {} past its end",
                row.list_name, current_step
            )));
        }

        Ok(UserList {
            user_id: row.user_id,
            name: row.list_name,
            items,
            current_step,
        })
    }
}

#[derive(Clone)]
#[derive(Debug)]
pub struct ListRepository {
    pool: PgPool,
}

impl ListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListStore for ListRepository {
    /// Find a list by owner and name
    async fn get(&self, user_id: &str, list_name: &str) -> Result<Option<UserList>> {
        let row = sqlx::query_as::<_, ListRow>(
            "SELECT user_id, list_name, items, number_of_steps, current_step, created_at, updated_at FROM lists WHERE user_id = $1 AND list_name = $2"
        )
        .bind(user_id)
        .bind(list_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserList::try_from).transpose()
    }

    /// Create or replace a list
    async fn put(&self, list: &UserList) -> Result<()> {
        log_list_write(&list.user_id, &list.name, "put", Some(list.number_of_steps()));

        sqlx::query(
            r#"
            INSERT INTO lists (user_id, list_name, items, number_of_steps, current_step, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (user_id, list_name) DO UPDATE
            SET items = EXCLUDED.items,
                number_of_steps = EXCLUDED.number_of_steps,
                current_step = EXCLUDED.current_step,
                updated_at = EXCLUDED.updated_at
            "#
        )
        .bind(&list.user_id)
        .bind(&list.name)
        .bind(Json(items_to_step_map(&list.items)))
        .bind(list.number_of_steps() as i32)
        .bind(list.current_step as i32)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Move the playback position of a list
    async fn update_position(&self, user_id: &str, list_name: &str, current_step: u32) -> Result<()> {
        log_list_write(user_id, list_name, "update_position", None);

        let result = sqlx::query(
            r#"
            UPDATE lists
            SET current_step = $3, updated_at = $4
            WHERE user_id = $1 AND list_name = $2 AND $3 <= number_of_steps
            "#
        )
        .bind(user_id)
        .bind(list_name)
        .bind(current_step as i32)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(GeneraListError::InvalidRecord(format!(
                "no list {:?} with a step {} to move to",
                list_name, current_step
            )));
        }

        Ok(())
    }

    /// Delete a list
    async fn delete(&self, user_id: &str, list_name: &str) -> Result<bool> {
        log_list_write(user_id, list_name, "delete", None);

        let result = sqlx::query("DELETE FROM lists WHERE user_id = $1 AND list_name = $2")
            .bind(user_id)
            .bind(list_name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Names of all lists of a user
    async fn list_names(&self, user_id: &str) -> Result<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT list_name FROM lists WHERE user_id = $1 ORDER BY list_name"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }
}
