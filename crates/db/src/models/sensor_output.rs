//! Sensor output (reading) model and DTOs.

use plantmon_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sensor_outputs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorOutput {
    pub id: DbId,
    pub plant_id: DbId,
    pub device_id: Option<String>,
    pub recorded_at: Timestamp,
    pub temperature: f64,
    pub soil_moisture: f64,
    pub light_level: f64,
    pub humidity: f64,
}

/// Body of a reading submission. The timestamp is assigned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorValues {
    pub temperature: f64,
    pub soil_moisture: f64,
    pub light_level: f64,
    pub humidity: f64,
}

/// DTO for inserting a reading.
#[derive(Debug, Clone)]
pub struct CreateSensorOutput {
    pub plant_id: DbId,
    pub device_id: Option<String>,
    pub values: SensorValues,
}

/// Optional time window and paging for reading queries.
#[derive(Debug, Clone, Default)]
pub struct SensorOutputFilter {
    pub since: Option<Timestamp>,
    pub until: Option<Timestamp>,
    pub limit: i64,
    pub offset: i64,
}

/// Aggregate statistics over a plant's readings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorSummary {
    pub count: i64,
    pub first_recorded_at: Option<Timestamp>,
    pub last_recorded_at: Option<Timestamp>,
    pub temperature_min: Option<f64>,
    pub temperature_avg: Option<f64>,
    pub temperature_max: Option<f64>,
    pub soil_moisture_min: Option<f64>,
    pub soil_moisture_avg: Option<f64>,
    pub soil_moisture_max: Option<f64>,
    pub light_level_min: Option<f64>,
    pub light_level_avg: Option<f64>,
    pub light_level_max: Option<f64>,
    pub humidity_min: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub humidity_max: Option<f64>,
}
