//! Serde helpers for request DTOs.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some(value)`.
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>` field this
/// distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`), which PATCH-like updates need to clear a column.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
