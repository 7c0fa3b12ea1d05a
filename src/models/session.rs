//! Session model
//!
//! `Session` is the typed, in-core view of a user's progress. Its persisted
//! and echoed form is `SessionAttributes`, a flat map of text fields; the two
//! convert into each other only at the store and envelope boundaries.

use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use crate::models::list::{item_at, items_to_step_map, step_map_to_items};
use crate::utils::errors::{GeneraListError, Result};
use crate::utils::helpers::parse_counter;

/// Task mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Task {
    Create,
    Edit,
    Play,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Create => "CREATE",
            Task::Edit => "EDIT",
            Task::Play => "PLAY",
        }
    }

    /// Parse the persisted label. `NONE` and the empty string mean idle.
    pub fn parse(label: &str) -> Result<Option<Task>> {
        match label.trim().to_ascii_uppercase().as_str() {
            "" | "NONE" => Ok(None),
            "CREATE" => Ok(Some(Task::Create)),
            "EDIT" => Ok(Some(Task::Edit)),
            "PLAY" => Ok(Some(Task::Play)),
            other => Err(GeneraListError::InvalidRecord(format!("unknown task: {}", other))),
        }
    }

    /// Create and Edit stage items in the session before they are committed
    pub fn is_staging(&self) -> bool {
        matches!(self, Task::Create | Task::Edit)
    }
}

/// The task a session is engaged in and the list it is about.
/// Held together so one can never be set without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub task: Task,
    pub list_name: String,
}

/// Per-user session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub activity: Option<Activity>,
    /// 1-based position in `items`; 0 is before the first item
    pub current_step: u32,
    /// Working copy of the list's items
    pub items: Vec<String>,
}

impl Session {
    /// Create an idle session for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            activity: None,
            current_step: 0,
            items: Vec::new(),
        }
    }

    pub fn task(&self) -> Option<Task> {
        self.activity.as_ref().map(|activity| activity.task)
    }

    pub fn current_list(&self) -> Option<&str> {
        self.activity.as_ref().map(|activity| activity.list_name.as_str())
    }

    pub fn is_current_list(&self, name: &str) -> bool {
        self.current_list() == Some(name)
    }

    pub fn number_of_steps(&self) -> u32 {
        self.items.len() as u32
    }

    /// Item at a 1-based step of the working copy
    pub fn item(&self, step: u32) -> Option<&str> {
        item_at(&self.items, step)
    }

    /// Label for logs
    pub fn task_label(&self) -> &'static str {
        self.task().map_or("NONE", |task| task.as_str())
    }

    /// Enter a task on a list with the given working copy
    pub fn begin(&mut self, task: Task, list_name: impl Into<String>, items: Vec<String>, current_step: u32) {
        self.activity = Some(Activity {
            task,
            list_name: list_name.into(),
        });
        self.items = items;
        self.current_step = current_step;
    }

    /// Switch task while keeping the list and working copy
    pub fn set_task(&mut self, task: Task) {
        if let Some(activity) = self.activity.as_mut() {
            activity.task = task;
        }
    }

    /// Return to idle
    pub fn clear(&mut self) {
        self.activity = None;
        self.current_step = 0;
        self.items.clear();
    }

    /// Partial update that turns `previous` into `self`, when only the
    /// step moved
    pub fn patch_from(&self, previous: &Session) -> Option<SessionPatch> {
        if self.user_id != previous.user_id
            || self.activity != previous.activity
            || self.items != previous.items
        {
            return None;
        }

        Some(SessionPatch {
            current_step: (self.current_step != previous.current_step).then_some(self.current_step),
        })
    }

    /// Text form for the echoed attributes and the session table
    pub fn to_attributes(&self) -> SessionAttributes {
        SessionAttributes {
            current_task: self.task().map(|task| task.as_str().to_string()),
            current_list: self.current_list().map(str::to_string),
            current_step: self.current_step.to_string(),
            number_of_steps: self.number_of_steps().to_string(),
            list_items: items_to_step_map(&self.items),
        }
    }

    /// Rebuild a session from its text form, checking every invariant
    pub fn from_attributes(user_id: impl Into<String>, attributes: &SessionAttributes) -> Result<Self> {
        let task = match attributes.current_task.as_deref() {
            Some(label) => Task::parse(label)?,
            None => None,
        };
        let list_name = attributes
            .current_list
            .as_deref()
            .filter(|name| !name.is_empty() && *name != "NONE");

        let activity = match (task, list_name) {
            (Some(task), Some(name)) => Some(Activity {
                task,
                list_name: name.to_string(),
            }),
            (None, None) => None,
            (task, name) => {
                return Err(GeneraListError::InvalidRecord(format!(
                    "task {:?} and list {:?} must be set together",
                    task, name
                )))
            }
        };

        let current_step = parse_counter("currentStep", &attributes.current_step)?;
        let number_of_steps = parse_counter("numberOfSteps", &attributes.number_of_steps)?;
        let items = step_map_to_items(&attributes.list_items)?;

        if number_of_steps as usize != items.len() {
            return Err(GeneraListError::InvalidRecord(format!(
                "numberOfSteps is {} but {} items are staged",
                number_of_steps,
                items.len()
            )));
        }
        if current_step > number_of_steps {
            return Err(GeneraListError::InvalidRecord(format!(
                "currentStep {} is past the last step {}",
                current_step, number_of_steps
            )));
        }

        Ok(Self {
            user_id: user_id.into(),
            activity,
            current_step,
            items,
        })
    }
}

/// Fields changed by a step-only update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub current_step: Option<u32>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self.current_step.is_none()
    }

    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(step) = self.current_step {
            fields.push((FIELD_CURRENT_STEP.to_string(), step.to_string()));
        }
        fields
    }
}

const FIELD_CURRENT_TASK: &str = "currentTask";
const FIELD_CURRENT_LIST: &str = "currentList";
const FIELD_CURRENT_STEP: &str = "currentStep";
const FIELD_NUMBER_OF_STEPS: &str = "numberOfSteps";
const FIELD_LIST_ITEMS: &str = "listItems";

/// Text form of a session, as echoed in `sessionAttributes` and stored in
/// the session table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_list: Option<String>,
    #[serde(default = "zero")]
    pub current_step: String,
    #[serde(default = "zero")]
    pub number_of_steps: String,
    #[serde(default)]
    pub list_items: BTreeMap<String, String>,
}

fn zero() -> String {
    "0".to_string()
}

impl Default for SessionAttributes {
    fn default() -> Self {
        Self {
            current_task: None,
            current_list: None,
            current_step: zero(),
            number_of_steps: zero(),
            list_items: BTreeMap::new(),
        }
    }
}

impl SessionAttributes {
    /// Flatten into hash fields; `listItems` is stored as JSON text
    pub fn to_fields(&self) -> Result<Vec<(String, String)>> {
        let mut fields = vec![
            (FIELD_CURRENT_STEP.to_string(), self.current_step.clone()),
            (FIELD_NUMBER_OF_STEPS.to_string(), self.number_of_steps.clone()),
            (FIELD_LIST_ITEMS.to_string(), serde_json::to_string(&self.list_items)?),
        ];
        if let Some(task) = &self.current_task {
            fields.push((FIELD_CURRENT_TASK.to_string(), task.clone()));
        }
        if let Some(list) = &self.current_list {
            fields.push((FIELD_CURRENT_LIST.to_string(), list.clone()));
        }
        Ok(fields)
    }

    /// Rebuild from hash fields. Unknown fields are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self> {
        let list_items = match fields.get(FIELD_LIST_ITEMS) {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
            _ => BTreeMap::new(),
        };

        Ok(Self {
            current_task: fields.get(FIELD_CURRENT_TASK).cloned(),
            current_list: fields.get(FIELD_CURRENT_LIST).cloned(),
            current_step: fields.get(FIELD_CURRENT_STEP).cloned().unwrap_or_else(zero),
            number_of_steps: fields.get(FIELD_NUMBER_OF_STEPS).cloned().unwrap_or_else(zero),
            list_items,
        })
    }
}
