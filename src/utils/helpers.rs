//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use crate::utils::errors::{GeneraListError, Result};

/// Normalise a raw slot value: trim and collapse inner whitespace.
/// Empty values count as absent.
pub fn normalize_slot(raw: Option<&str>) -> Option<String> {
    let collapsed = raw?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Canonical key for a list name. Names compare case-insensitively.
pub fn list_key(name: &str) -> String {
    name.to_lowercase()
}

/// Parse a persisted step counter
pub fn parse_counter(field: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        GeneraListError::InvalidRecord(format!("{} is not a step number: {:?}", field, value))
    })
}

/// Join names for speech: "a", "a and b", "a, b and c"
pub fn join_for_speech(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
