//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use plantmon_core::error::CoreError;
use plantmon_db::models::user::{User, UserResponse};
use plantmon_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, validate_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: &'static str,
    /// Seconds until the returned token expires.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Hands back the user's current
/// token while it is still valid, otherwise issues and stores a new one.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let now = Utc::now();
    let is_locked = user.locked_until.is_some_and(|until| until > now);

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    // Account state is only reported to callers holding the right password.
    if !password_valid {
        if !is_locked {
            let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
            if failures >= MAX_FAILED_ATTEMPTS {
                let lock_until = now + chrono::Duration::minutes(LOCK_DURATION_MINS);
                UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
                tracing::warn!(user_id = user.id, failures, "Account locked after failed logins");
            }
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if is_locked {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = issue_or_reuse_token(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the caller's stored token. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    UserRepo::set_access_token(&state.pool, auth_user.user_id, None).await?;
    tracing::info!(user_id = auth_user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Return the stored token if it still validates for `user`, otherwise
/// generate a fresh one and persist it.
async fn issue_or_reuse_token(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let now = Utc::now().timestamp();

    if let Some(stored) = user.access_token.as_deref() {
        if let Ok(claims) = validate_token(stored, &state.config.jwt) {
            if claims.sub == user.id {
                return Ok(TokenResponse {
                    access_token: stored.to_string(),
                    token_type: "bearer",
                    expires_in: (claims.exp - now).max(0),
                });
            }
        }
    }

    let access_token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    UserRepo::set_access_token(&state.pool, user.id, Some(&access_token)).await?;

    Ok(TokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.config.jwt.expires_in_secs(),
    })
}
