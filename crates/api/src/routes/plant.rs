//! Route definitions for the `/plants` resource and its sub-resources.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{device, plant, sensor_output};
use crate::state::AppState;

/// Routes mounted at `/plants`.
///
/// ```text
/// GET    /                             -> list
/// POST   /                             -> create
/// GET    /{id}                         -> get_by_id
/// PUT    /{id}                         -> update
/// DELETE /{id}                         -> delete
/// POST   /{id}/image                   -> upload_image (multipart, size-limited)
/// DELETE /{id}/image                   -> delete_image
/// GET    /{id}/device                  -> device::get_by_plant
/// GET    /{id}/sensor-outputs          -> sensor_output::list_by_plant
/// POST   /{id}/sensor-outputs          -> sensor_output::create_for_plant
/// GET    /{id}/sensor-outputs/latest   -> sensor_output::latest
/// GET    /{id}/sensor-outputs/summary  -> sensor_output::summary
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(plant::list).post(plant::create))
        .route(
            "/{id}",
            get(plant::get_by_id)
                .put(plant::update)
                .delete(plant::delete),
        )
        .route(
            "/{id}/image",
            post(plant::upload_image)
                .delete(plant::delete_image)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/{id}/device", get(device::get_by_plant))
        .route(
            "/{id}/sensor-outputs",
            get(sensor_output::list_by_plant).post(sensor_output::create_for_plant),
        )
        .route("/{id}/sensor-outputs/latest", get(sensor_output::latest))
        .route("/{id}/sensor-outputs/summary", get(sensor_output::summary))
}
