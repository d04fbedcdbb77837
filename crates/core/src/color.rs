//! Color tag validation shared by decks and tasks.

use crate::error::CoreError;

/// Validate that a color string matches the `#RRGGBB` hex format.
///
/// `field` names the offending field in the error message.
pub fn validate_hex_color(field: &str, color: &str) -> Result<(), CoreError> {
    if color.len() != 7 {
        return Err(CoreError::Validation(format!(
            "Invalid {field} '{color}'. Must be in #RRGGBB hex format"
        )));
    }

    if !color.starts_with('#') {
        return Err(CoreError::Validation(format!(
            "Invalid {field} '{color}'. Must start with '#'"
        )));
    }

    if !color[1..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid {field} '{color}'. Must contain only hex digits after '#'"
        )));
    }

    Ok(())
}
