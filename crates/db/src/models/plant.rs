//! Plant entity model and DTOs.

use plantmon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A plant row from the `plants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Object-store key backing `image_url`; internal only.
    #[serde(skip)]
    pub image_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or fully replacing a plant.
#[derive(Debug, Clone, Deserialize)]
pub struct PlantInput {
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    pub location: String,
    pub description: String,
}

impl PlantInput {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            plant_type: self.plant_type.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}
