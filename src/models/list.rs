//! List model

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{GeneraListError, Result};

/// A named, ordered list owned by one user.
///
/// Step `k` (1-based) is `items[k - 1]`; step 0 means "before the first item".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    pub user_id: String,
    pub name: String,
    pub items: Vec<String>,
    /// Last persisted playback position
    pub current_step: u32,
}

impl UserList {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            items: Vec::new(),
            current_step: 0,
        }
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    pub fn number_of_steps(&self) -> u32 {
        self.items.len() as u32
    }

    /// Item at a 1-based step
    pub fn item(&self, step: u32) -> Option<&str> {
        item_at(&self.items, step)
    }
}

/// Item at a 1-based step of an item sequence
pub fn item_at(items: &[String], step: u32) -> Option<&str> {
    if step == 0 {
        return None;
    }
    items.get(step as usize - 1).map(String::as_str)
}

/// Persisted form of an item sequence: `{"1": "...", "2": "..."}`
pub fn items_to_step_map(items: &[String]) -> BTreeMap<String, String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| ((index + 1).to_string(), item.clone()))
        .collect()
}

/// Rebuild an item sequence from its persisted step map.
///
/// Keys are ordered numerically, so "10" follows "9". Any key that is not a
/// step number, or a gap in 1..=n, makes the record invalid.
pub fn step_map_to_items(map: &BTreeMap<String, String>) -> Result<Vec<String>> {
    let mut steps = Vec::with_capacity(map.len());
    for (key, value) in map {
        let step = key.trim().parse::<u32>().map_err(|_| {
            GeneraListError::InvalidRecord(format!("step key is not a number: {:?}", key))
        })?;
        steps.push((step, value.clone()));
    }
    steps.sort_by_key(|(step, _)| *step);

    for (expected, (step, _)) in (1u32..).zip(steps.iter()) {
        if *step != expected {
            return Err(GeneraListError::InvalidRecord(format!(
                "step keys must run 1..={} without gaps, found {} at position {}",
                map.len(),
                step,
                expected
            )));
        }
    }

    Ok(steps.into_iter().map(|(_, value)| value).collect())
}
