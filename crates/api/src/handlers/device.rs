//! Handlers for the `/devices` resource.
//!
//! A device is available while `plant_id` is null and can be assigned to at
//! most one plant at a time.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use plantmon_core::device::{validate_device_id, validate_device_name};
use plantmon_core::error::CoreError;
use plantmon_core::types::DbId;
use plantmon_db::models::device::{CreateDevice, Device, UpdateDevice};
use plantmon_db::repositories::{DeviceRepo, PlantRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePlantAccess;
use crate::query::DeviceListParams;
use crate::state::AppState;

/// POST /api/v1/devices
///
/// Register a device under its hardware id, optionally assigned to a plant.
pub async fn create(
    State(state): State<AppState>,
    RequirePlantAccess(user): RequirePlantAccess,
    Json(input): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<Device>)> {
    validate_device_id(&input.id)?;
    validate_device_name(&input.device_name)?;

    if DeviceRepo::find_by_id(&state.pool, &input.id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Device {} already exists",
            input.id
        ))));
    }
    if let Some(plant_id) = input.plant_id {
        ensure_plant_is_free(&state, plant_id, None).await?;
    }

    let device = DeviceRepo::create(
        &state.pool,
        &CreateDevice {
            device_name: input.device_name.trim().to_string(),
            ..input
        },
    )
    .await?;

    tracing::info!(
        device_id = %device.id,
        plant_id = ?device.plant_id,
        user_id = user.user_id,
        "Device registered"
    );
    Ok((StatusCode::CREATED, Json(device)))
}

/// GET /api/v1/devices
///
/// All devices, or only unassigned ones with `?available=true`.
pub async fn list(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Query(params): Query<DeviceListParams>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = if params.available {
        DeviceRepo::list_available(&state.pool).await?
    } else {
        DeviceRepo::list(&state.pool).await?
    };
    Ok(Json(devices))
}

/// GET /api/v1/devices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(id): Path<String>,
) -> AppResult<Json<Device>> {
    let device = find_device(&state, &id).await?;
    Ok(Json(device))
}

/// GET /api/v1/plants/{id}/device
///
/// The device currently assigned to the plant.
pub async fn get_by_plant(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(plant_id): Path<DbId>,
) -> AppResult<Json<Device>> {
    if !PlantRepo::exists(&state.pool, plant_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }));
    }
    let device = DeviceRepo::find_by_plant(&state.pool, plant_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundKey {
                entity: "Device",
                key: format!("for plant {plant_id}"),
            })
        })?;
    Ok(Json(device))
}

/// PUT /api/v1/devices/{id}
///
/// Rename and/or (re)assign a device. `plant_id: null` makes it available
/// again; omitting `plant_id` keeps the current assignment.
pub async fn update(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(id): Path<String>,
    Json(input): Json<UpdateDevice>,
) -> AppResult<Json<Device>> {
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }
    if let Some(name) = input.device_name.as_deref() {
        validate_device_name(name)?;
    }

    find_device(&state, &id).await?;
    if let Some(Some(plant_id)) = input.plant_id {
        ensure_plant_is_free(&state, plant_id, Some(&id)).await?;
    }

    let input = UpdateDevice {
        device_name: input.device_name.map(|n| n.trim().to_string()),
        ..input
    };
    let device = DeviceRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| device_not_found(&id))?;
    Ok(Json(device))
}

/// DELETE /api/v1/devices/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !DeviceRepo::delete(&state.pool, &id).await? {
        return Err(device_not_found(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn device_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFoundKey {
        entity: "Device",
        key: id.to_string(),
    })
}

async fn find_device(state: &AppState, id: &str) -> AppResult<Device> {
    DeviceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| device_not_found(id))
}

/// Check that `plant_id` exists and has no device other than `except`.
///
/// Concurrent assignments that slip past this check still hit
/// `uq_devices_plant_id` and surface as 409.
async fn ensure_plant_is_free(
    state: &AppState,
    plant_id: DbId,
    except: Option<&str>,
) -> AppResult<()> {
    if !PlantRepo::exists(&state.pool, plant_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id: plant_id,
        }));
    }
    if let Some(current) = DeviceRepo::find_by_plant(&state.pool, plant_id).await? {
        if Some(current.id.as_str()) != except {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Plant {plant_id} already has device {}",
                current.id
            ))));
        }
    }
    Ok(())
}
