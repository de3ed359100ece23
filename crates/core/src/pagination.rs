//! Pagination defaults and clamping helpers.

/// Default number of sensor outputs per page.
pub const DEFAULT_SENSOR_LIMIT: i64 = 100;

/// Maximum number of sensor outputs per page.
pub const MAX_SENSOR_LIMIT: i64 = 1000;

/// Clamp a user-provided limit into `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None, 100, 1000), 100);
        assert_eq!(clamp_limit(Some(0), 100, 1000), 1);
        assert_eq!(clamp_limit(Some(-5), 100, 1000), 1);
        assert_eq!(clamp_limit(Some(5000), 100, 1000), 1000);
        assert_eq!(clamp_limit(Some(42), 100, 1000), 42);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(30)), 30);
    }
}
