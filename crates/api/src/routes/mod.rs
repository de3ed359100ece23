pub mod admin;
pub mod auth;
pub mod device;
pub mod health;
pub mod plant;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                get, update
/// /admin/users/{id}/reset-password                 reset password
///
/// /plants                                          list, create
/// /plants/{id}                                     get, update, delete
/// /plants/{id}/image                               upload (multipart), remove
/// /plants/{id}/device                              assigned device
/// /plants/{id}/sensor-outputs                      list, create
/// /plants/{id}/sensor-outputs/latest               newest reading
/// /plants/{id}/sensor-outputs/summary              aggregates
///
/// /devices                                         list (?available=true), create
/// /devices/{id}                                    get, update, delete
/// /devices/{id}/sensor-outputs                     submit reading as the device
/// ```
///
/// Plant and device routes require `plant_monitoring` or `admin`.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/plants", plant::router(max_upload_bytes))
        .nest("/devices", device::router())
}
