//! Handlers for the `/plants` resource, including plant images.
//!
//! All handlers require `plant_monitoring` or `admin` via [`RequirePlantAccess`].

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use plantmon_core::error::CoreError;
use plantmon_core::plant::validate_plant_fields;
use plantmon_core::plant_image::{object_key, PlantImageFormat};
use plantmon_core::types::DbId;
use plantmon_db::models::plant::{Plant, PlantInput};
use plantmon_db::repositories::PlantRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequirePlantAccess;
use crate::state::AppState;

/// Name of the multipart field carrying the image bytes.
const IMAGE_FIELD: &str = "file";

/// POST /api/v1/plants
pub async fn create(
    State(state): State<AppState>,
    RequirePlantAccess(user): RequirePlantAccess,
    Json(input): Json<PlantInput>,
) -> AppResult<(StatusCode, Json<Plant>)> {
    let input = checked_input(&input)?;
    let plant = PlantRepo::create(&state.pool, &input).await?;
    tracing::info!(plant_id = plant.id, user_id = user.user_id, "Plant created");
    Ok((StatusCode::CREATED, Json(plant)))
}

/// GET /api/v1/plants
///
/// All plants, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
) -> AppResult<Json<Vec<Plant>>> {
    let plants = PlantRepo::list(&state.pool).await?;
    Ok(Json(plants))
}

/// GET /api/v1/plants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(id): Path<DbId>,
) -> AppResult<Json<Plant>> {
    let plant = find_plant(&state, id).await?;
    Ok(Json(plant))
}

/// PUT /api/v1/plants/{id}
///
/// Replace name, type, location and description. The image is untouched.
pub async fn update(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(id): Path<DbId>,
    Json(input): Json<PlantInput>,
) -> AppResult<Json<Plant>> {
    let input = checked_input(&input)?;
    let plant = PlantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id,
        }))?;
    Ok(Json(plant))
}

/// DELETE /api/v1/plants/{id}
///
/// Readings go with the plant, devices become available, and the stored
/// image is removed if the store allows it.
pub async fn delete(
    State(state): State<AppState>,
    RequirePlantAccess(user): RequirePlantAccess,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let plant = PlantRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id,
        }))?;

    if let Some(key) = plant.image_key.as_deref() {
        discard_image(&state, key).await;
    }

    tracing::info!(plant_id = id, user_id = user.user_id, "Plant deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/plants/{id}/image
///
/// Accepts a multipart body with a `file` field holding a PNG, JPEG or WebP
/// image. The image replaces any previous one and the updated plant is
/// returned.
pub async fn upload_image(
    State(state): State<AppState>,
    RequirePlantAccess(user): RequirePlantAccess,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<Plant>> {
    let previous = find_plant(&state, id).await?;

    let mut data: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field.bytes().await.map_err(multipart_error)?;
            data = Some(bytes.to_vec());
        }
    }

    let data = data.ok_or_else(|| {
        AppError::BadRequest(format!("Missing required '{IMAGE_FIELD}' field"))
    })?;
    let format = PlantImageFormat::detect(&data)?;
    let size_bytes = data.len();

    let key = object_key(id, format);
    let url = state.images.put(&key, data, format.content_type()).await?;

    let plant = match PlantRepo::set_image(&state.pool, id, &url, &key).await? {
        Some(plant) => plant,
        None => {
            // Plant vanished while the upload was in flight.
            discard_image(&state, &key).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Plant",
                id,
            }));
        }
    };

    if let Some(old_key) = previous.image_key.as_deref() {
        discard_image(&state, old_key).await;
    }

    tracing::info!(
        plant_id = id,
        user_id = user.user_id,
        key = %key,
        size_bytes,
        "Plant image stored"
    );
    Ok(Json(plant))
}

/// DELETE /api/v1/plants/{id}/image
pub async fn delete_image(
    State(state): State<AppState>,
    RequirePlantAccess(_user): RequirePlantAccess,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let previous = find_plant(&state, id).await?;
    PlantRepo::clear_image(&state.pool, id).await?;

    if let Some(key) = previous.image_key.as_deref() {
        discard_image(&state, key).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_plant(state: &AppState, id: DbId) -> AppResult<Plant> {
    PlantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plant",
            id,
        }))
}

fn checked_input(input: &PlantInput) -> Result<PlantInput, CoreError> {
    let input = input.trimmed();
    validate_plant_fields(
        &input.name,
        &input.plant_type,
        &input.location,
        &input.description,
    )?;
    Ok(input)
}

/// Remove an image object, logging instead of failing.
async fn discard_image(state: &AppState, key: &str) {
    if let Err(e) = state.images.delete(key).await {
        tracing::warn!(key = %key, error = %e, "Failed to delete plant image");
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
