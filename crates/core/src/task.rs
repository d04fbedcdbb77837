//! Planner task input rules.

use chrono::NaiveTime;
use serde_json::Value;

use crate::color::validate_hex_color;
use crate::error::CoreError;
use crate::types::{parse_id_value, DbId};

/// Accepted `task_time` formats, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Parse a task's time of day from `HH:MM` or `HH:MM:SS`.
pub fn parse_task_time(value: &str) -> Result<NaiveTime, CoreError> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid task_time '{value}'. Expected HH:MM or HH:MM:SS"
            ))
        })
}

/// Read the deck a task refers to. Accepts a number or a numeric string.
pub fn parse_task_deck_id(raw: Option<&Value>) -> Result<DbId, CoreError> {
    match parse_id_value(raw) {
        Some(Some(id)) => Ok(id),
        Some(None) => Err(CoreError::Validation("Missing required fields".into())),
        None => Err(CoreError::Validation(
            "deck_id must be a positive integer".into(),
        )),
    }
}

/// Validate a task submission and return the parsed time of day.
pub fn validate_task_input(task_time: &str, color: &str) -> Result<NaiveTime, CoreError> {
    if task_time.trim().is_empty() || color.trim().is_empty() {
        return Err(CoreError::Validation("Missing required fields".into()));
    }
    let time = parse_task_time(task_time)?;
    validate_hex_color("color", color)?;
    Ok(time)
}
