//! Route definitions for the `/devices` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{device, sensor_output};
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// GET    /                      -> list (?available=true)
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/sensor-outputs   -> sensor_output::create_from_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(device::list).post(device::create))
        .route(
            "/{id}",
            get(device::get_by_id)
                .put(device::update)
                .delete(device::delete),
        )
        .route(
            "/{id}/sensor-outputs",
            post(sensor_output::create_from_device),
        )
}
