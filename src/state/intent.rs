//! Intents understood by the skill
//!
//! Maps the platform's intent names and slots onto typed intents. Slot values
//! are normalised here, once; list names are lower-cased so that "Groceries"
//! and "groceries" address the same list.

use crate::models::IntentPayload;
use crate::utils::errors::{GeneraListError, Result};
use crate::utils::helpers::{list_key, normalize_slot};

pub const SLOT_LIST_NAME: &str = "listName";
pub const SLOT_ITEM: &str = "item";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create { list_name: Option<String> },
    Add { item: Option<String> },
    Save,
    Stop,
    Cancel,
    Load { list_name: Option<String> },
    /// Without a name, edits the current list
    Edit { list_name: Option<String> },
    Next,
    Previous,
    PeekNext,
    ReviewPrevious,
    StartOver,
    /// Without a name, deletes the current list
    Delete { list_name: Option<String> },
    Help,
    ListLists,
}

impl Intent {
    pub fn from_payload(payload: &IntentPayload) -> Result<Self> {
        let list_name = || normalize_slot(payload.slot_value(SLOT_LIST_NAME)).map(|name| list_key(&name));

        let intent = match payload.name.as_str() {
            "CreateListIntent" => Intent::Create { list_name: list_name() },
            "AddItemIntent" => Intent::Add {
                item: normalize_slot(payload.slot_value(SLOT_ITEM)),
            },
            "SaveListIntent" => Intent::Save,
            "AMAZON.StopIntent" => Intent::Stop,
            "AMAZON.CancelIntent" => Intent::Cancel,
            "LoadListIntent" => Intent::Load { list_name: list_name() },
            "EditListIntent" => Intent::Edit { list_name: list_name() },
            "AMAZON.NextIntent" | "NextStepIntent" => Intent::Next,
            "AMAZON.PreviousIntent" | "PreviousStepIntent" => Intent::Previous,
            "PeekNextIntent" => Intent::PeekNext,
            "ReviewPreviousIntent" => Intent::ReviewPrevious,
            "AMAZON.StartOverIntent" => Intent::StartOver,
            "DeleteListIntent" => Intent::Delete { list_name: list_name() },
            "AMAZON.HelpIntent" => Intent::Help,
            "ListListsIntent" => Intent::ListLists,
            other => return Err(GeneraListError::UnknownIntent(other.to_string())),
        };

        Ok(intent)
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Create { .. } => "create",
            Intent::Add { .. } => "add",
            Intent::Save => "save",
            Intent::Stop => "stop",
            Intent::Cancel => "cancel",
            Intent::Load { .. } => "load",
            Intent::Edit { .. } => "edit",
            Intent::Next => "next",
            Intent::Previous => "previous",
            Intent::PeekNext => "peek_next",
            Intent::ReviewPrevious => "review_previous",
            Intent::StartOver => "start_over",
            Intent::Delete { .. } => "delete",
            Intent::Help => "help",
            Intent::ListLists => "list_lists",
        }
    }
}
