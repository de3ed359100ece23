//! Sensor reading ranges and validation.
//!
//! Readings outside these ranges are treated as sensor faults and rejected
//! at the API boundary rather than stored.

use std::ops::RangeInclusive;

use crate::error::CoreError;

/// Air temperature in degrees Celsius.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = -50.0..=80.0;

/// Volumetric soil moisture, percent.
pub const SOIL_MOISTURE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Relative humidity, percent.
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Illuminance in lux. Non-negative, no upper cap.
pub const MIN_LIGHT_LEVEL: f64 = 0.0;

/// Validate a full set of sensor values.
pub fn validate_reading(
    temperature: f64,
    soil_moisture: f64,
    light_level: f64,
    humidity: f64,
) -> Result<(), CoreError> {
    check("temperature", temperature, &TEMPERATURE_RANGE)?;
    check("soil_moisture", soil_moisture, &SOIL_MOISTURE_RANGE)?;
    check_min("light_level", light_level, MIN_LIGHT_LEVEL)?;
    check("humidity", humidity, &HUMIDITY_RANGE)?;
    Ok(())
}

fn check(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<(), CoreError> {
    check_finite(name, value)?;
    if !range.contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

fn check_min(name: &str, value: f64, min: f64) -> Result<(), CoreError> {
    check_finite(name, value)?;
    if value < min {
        return Err(CoreError::Validation(format!(
            "{name} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

fn check_finite(name: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!("{name} must be a finite number")));
    }
    Ok(())
}
