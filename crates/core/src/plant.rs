//! Plant field constraints.

use crate::error::CoreError;

/// Maximum length of the short text fields (name, type, location).
pub const MAX_SHORT_FIELD_LEN: usize = 200;

/// Maximum length of a plant description.
pub const MAX_DESCRIPTION_LEN: usize = 4000;

/// Validate the user-editable plant fields.
///
/// Every field is required and must be non-blank after trimming.
pub fn validate_plant_fields(
    name: &str,
    plant_type: &str,
    location: &str,
    description: &str,
) -> Result<(), CoreError> {
    require_text("name", name, MAX_SHORT_FIELD_LEN)?;
    require_text("type", plant_type, MAX_SHORT_FIELD_LEN)?;
    require_text("location", location, MAX_SHORT_FIELD_LEN)?;
    require_text("description", description, MAX_DESCRIPTION_LEN)?;
    Ok(())
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}
