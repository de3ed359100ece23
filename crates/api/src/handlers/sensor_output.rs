//! Handlers for plant sensor outputs (readings).
//!
//! Readings are always attached to a plant. Devices may submit on behalf of
//! the plant they are assigned to.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use plantmon_core::error::CoreError;
use plantmon_core::sensor::validate_reading;
use plantmon_core::types::DbId;
use plantmon_db::models::sensor_output::{
    CreateSensorOutput, SensorOutput, SensorSummary, SensorValues,
};
use plantmon_db::repositories::{DeviceRepo, PlantRepo, SensorOutputRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePlantAccess;
use crate::query::{SensorOutputListParams, TimeWindowParams};
use crate::state::AppState;

/// GET /api/v1/plants/{id}/sensor-outputs
///
/// Readings for the plant, newest first. An existing plant with no readings
/// yields an empty list.
pub async fn list_by_plant(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(plant_id): Path<DbId>,
    Query(params): Query<SensorOutputListParams>,
) -> AppResult<Json<Vec<SensorOutput>>> {
    ensure_plant_exists(&state, plant_id).await?;
    let outputs =
        SensorOutputRepo::list_by_plant(&state.pool, plant_id, &params.to_filter()).await?;
    Ok(Json(outputs))
}

/// POST /api/v1/plants/{id}/sensor-outputs
pub async fn create_for_plant(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(plant_id): Path<DbId>,
    Json(values): Json<SensorValues>,
) -> AppResult<(StatusCode, Json<SensorOutput>)> {
    check_values(&values)?;
    ensure_plant_exists(&state, plant_id).await?;

    let output = SensorOutputRepo::create(
        &state.pool,
        &CreateSensorOutput {
            plant_id,
            device_id: None,
            values,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(output)))
}

/// POST /api/v1/devices/{id}/sensor-outputs
///
/// Record a reading for whichever plant the device is assigned to.
pub async fn create_from_device(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(device_id): Path<String>,
    Json(values): Json<SensorValues>,
) -> AppResult<(StatusCode, Json<SensorOutput>)> {
    check_values(&values)?;

    let device = DeviceRepo::find_by_id(&state.pool, &device_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundKey {
                entity: "Device",
                key: device_id.clone(),
            })
        })?;

    let plant_id = device.plant_id.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Device {device_id} is not assigned to a plant"
        )))
    })?;

    let output = SensorOutputRepo::create(
        &state.pool,
        &CreateSensorOutput {
            plant_id,
            device_id: Some(device.id),
            values,
        },
    )
    .await?;

    tracing::debug!(plant_id, device_id = %device_id, "Device reading recorded");
    Ok((StatusCode::CREATED, Json(output)))
}

/// GET /api/v1/plants/{id}/sensor-outputs/latest
pub async fn latest(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(plant_id): Path<DbId>,
) -> AppResult<Json<SensorOutput>> {
    ensure_plant_exists(&state, plant_id).await?;
    let output = SensorOutputRepo::latest_for_plant(&state.pool, plant_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundKey {
                entity: "SensorOutput",
                key: format!("latest for plant {plant_id}"),
            })
        })?;
    Ok(Json(output))
}

/// GET /api/v1/plants/{id}/sensor-outputs/summary
///
/// Count plus min/avg/max of every metric over the optional window.
pub async fn summary(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(plant_id): Path<DbId>,
    Query(window): Query<TimeWindowParams>,
) -> AppResult<Json<SensorSummary>> {
    ensure_plant_exists(&state, plant_id).await?;
    let summary =
        SensorOutputRepo::summary_for_plant(&state.pool, plant_id, window.since, window.until)
            .await?;
    Ok(Json(summary))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_plant_exists(state: &AppState, plant_id: DbId) -> AppResult<()> {
    if !PlantRepo::exists(&state.pool, plant_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }));
    }
    Ok(())
}

fn check_values(values: &SensorValues) -> Result<(), CoreError> {
    validate_reading(
        values.temperature,
        values.soil_moisture,
        values.light_level,
        values.humidity,
    )
}
