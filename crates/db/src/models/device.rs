//! Monitoring device model and DTOs.

use plantmon_core::serde_ext::deserialize_some;
use plantmon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `devices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: String,
    pub device_name: String,
    /// `None` while the device is available for assignment.
    pub plant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a device.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevice {
    pub id: String,
    pub device_name: String,
    #[serde(default)]
    pub plant_id: Option<DbId>,
}

/// DTO for updating a device.
///
/// `plant_id` is tri-state: absent leaves the assignment alone, `null`
/// unassigns the device, and a value reassigns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDevice {
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub plant_id: Option<Option<DbId>>,
}

impl UpdateDevice {
    /// Whether the update touches no field.
    pub fn is_empty(&self) -> bool {
        self.device_name.is_none() && self.plant_id.is_none()
    }
}
