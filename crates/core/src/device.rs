//! Device identifier and name rules.
//!
//! Device ids are assigned by the hardware (MAC address, serial, etc.), so
//! the service accepts them from the client instead of generating them.

use crate::error::CoreError;

/// Maximum length of a device id.
pub const MAX_DEVICE_ID_LEN: usize = 64;

/// Maximum length of a device display name.
pub const MAX_DEVICE_NAME_LEN: usize = 200;

/// Validate a client-supplied device id: 1..=64 chars of `[A-Za-z0-9_.:-]`.
pub fn validate_device_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() || id.len() > MAX_DEVICE_ID_LEN {
        return Err(CoreError::Validation(format!(
            "Device id must be between 1 and {MAX_DEVICE_ID_LEN} characters"
        )));
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')))
    {
        return Err(CoreError::Validation(format!(
            "Device id contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Validate a device display name (non-blank, bounded length).
pub fn validate_device_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("device_name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_DEVICE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "device_name must be at most {MAX_DEVICE_NAME_LEN} characters"
        )));
    }
    Ok(())
}
