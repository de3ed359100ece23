//! Shared query parameter types for API handlers.

use plantmon_core::pagination::{clamp_limit, clamp_offset, DEFAULT_SENSOR_LIMIT, MAX_SENSOR_LIMIT};
use plantmon_core::types::Timestamp;
use plantmon_db::models::sensor_output::SensorOutputFilter;
use serde::Deserialize;

/// Time window parameters (`?since=&until=`), RFC 3339 timestamps.
#[derive(Debug, Default, Deserialize)]
pub struct TimeWindowParams {
    pub since: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

/// Window plus paging for reading lists (`?since=&until=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct SensorOutputListParams {
    pub since: Option<Timestamp>,
    pub until: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SensorOutputListParams {
    /// Repository filter with limit and offset clamped.
    pub fn to_filter(&self) -> SensorOutputFilter {
        SensorOutputFilter {
            since: self.since,
            until: self.until,
            limit: clamp_limit(self.limit, DEFAULT_SENSOR_LIMIT, MAX_SENSOR_LIMIT),
            offset: clamp_offset(self.offset),
        }
    }
}

/// Query parameters for the device list (`?available=true`).
#[derive(Debug, Default, Deserialize)]
pub struct DeviceListParams {
    #[serde(default)]
    pub available: bool,
}
