//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose roles do not
//! meet the requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use plantmon_core::error::CoreError;
use plantmon_core::roles::{can_monitor_plants, is_admin};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin(&user.roles) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `plant_monitoring` or `admin`. Guards plant, sensor, and device routes.
pub struct RequirePlantAccess(pub AuthUser);

impl FromRequestParts<AppState> for RequirePlantAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_monitor_plants(&user.roles) {
            return Err(AppError::Core(CoreError::Forbidden(
                "plant_monitoring or admin role required".into(),
            )));
        }
        Ok(RequirePlantAccess(user))
    }
}
