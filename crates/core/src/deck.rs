//! Deck input rules.
//!
//! A deck's folder is a free-text label, not an entity. Decks that share the
//! same label form a folder; an absent label is stored as the empty string.

use crate::color::validate_hex_color;
use crate::error::CoreError;

/// Maximum length of a deck name in characters.
pub const MAX_DECK_NAME_LENGTH: usize = 200;

/// Validate the required fields of a deck create/update submission.
pub fn validate_deck_input(name: &str, color: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() || color.trim().is_empty() {
        return Err(CoreError::Validation(
            "Name and color are required.".into(),
        ));
    }
    if name.chars().count() > MAX_DECK_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Deck name must be at most {MAX_DECK_NAME_LENGTH} characters."
        )));
    }
    validate_hex_color("color", color)
}

/// Normalize an optional free-text field (folder, description) for storage.
///
/// `None` and whitespace-only values become the empty string; anything else
/// is trimmed.
pub fn normalize_label(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
