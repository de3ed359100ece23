//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token and the stored session token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequirePlantAccess`] -- Requires `plant_monitoring` or `admin`.

pub mod auth;
pub mod rbac;
