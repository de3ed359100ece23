//! Well-known role names.
//!
//! Roles are stored as a `TEXT[]` on each user row. A user may hold several.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PLANT_MONITORING: &str = "plant_monitoring";

/// Every role the service recognises.
pub const KNOWN_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PLANT_MONITORING];

/// Whether the role set grants access to plant, sensor, and device endpoints.
pub fn can_monitor_plants<S: AsRef<str>>(roles: &[S]) -> bool {
    roles
        .iter()
        .any(|r| r.as_ref() == ROLE_PLANT_MONITORING || r.as_ref() == ROLE_ADMIN)
}

/// Whether the role set contains `admin`.
pub fn is_admin<S: AsRef<str>>(roles: &[S]) -> bool {
    roles.iter().any(|r| r.as_ref() == ROLE_ADMIN)
}

/// Reject unknown role names and return the list de-duplicated, order kept.
pub fn normalize_roles(roles: &[String]) -> Result<Vec<String>, CoreError> {
    let mut out: Vec<String> = Vec::with_capacity(roles.len());
    for role in roles {
        let role = role.trim();
        if !KNOWN_ROLES.contains(&role) {
            return Err(CoreError::Validation(format!(
                "Unknown role '{role}'. Must be one of: {KNOWN_ROLES:?}"
            )));
        }
        if !out.iter().any(|r| r == role) {
            out.push(role.to_string());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitoring_role_grants_access() {
        assert!(can_monitor_plants(&["plant_monitoring"]));
        assert!(can_monitor_plants(&["admin"]));
        assert!(!can_monitor_plants::<&str>(&[]));
        assert!(!can_monitor_plants(&["viewer"]));
    }

    #[test]
    fn admin_check_ignores_other_roles() {
        assert!(is_admin(&["plant_monitoring", "admin"]));
        assert!(!is_admin(&["plant_monitoring"]));
    }

    #[test]
    fn normalize_dedupes_and_trims() {
        let roles = vec![
            " admin".to_string(),
            "plant_monitoring".to_string(),
            "admin".to_string(),
        ];
        assert_eq!(
            normalize_roles(&roles).unwrap(),
            vec!["admin".to_string(), "plant_monitoring".to_string()]
        );
    }

    #[test]
    fn normalize_rejects_unknown() {
        let err = normalize_roles(&["root".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Unknown role 'root'"));
    }
}
