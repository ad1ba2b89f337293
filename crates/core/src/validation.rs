//! Input validation utilities.
//!
//! Observed values are checked against physiological bounds before they are stored, so that a
//! record which exists is always safe to score.

use crate::constants::{CBG_MAX, CBG_MIN, SPO2_MAX, SPO2_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN};
use crate::{ScoreError, ScoreResult};

/// Round a reading to one decimal place, halves away from zero.
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Validates an oxygen saturation percentage.
///
/// # Errors
///
/// Returns `ScoreError::InvalidObservation` if `spo2` is outside `0..=100`.
pub fn validate_spo2(spo2: u8) -> ScoreResult<u8> {
    if !(SPO2_MIN..=SPO2_MAX).contains(&spo2) {
        return Err(ScoreError::invalid_observation("oxygen_saturation", spo2));
    }
    Ok(spo2)
}

/// Validates an already-rounded temperature in degrees Celsius.
///
/// # Errors
///
/// Returns `ScoreError::InvalidObservation` if the value is not finite or is outside `0..=45`.
pub fn validate_temperature(temperature: f64) -> ScoreResult<f64> {
    validate_real("temperature", temperature, TEMPERATURE_MIN, TEMPERATURE_MAX)
}

/// Validates an already-rounded capillary blood glucose reading in mmol/L.
///
/// # Errors
///
/// Returns `ScoreError::InvalidObservation` if the value is not finite or is outside `0..=45`.
pub fn validate_blood_glucose(cbg: f64) -> ScoreResult<f64> {
    validate_real("blood_glucose", cbg, CBG_MIN, CBG_MAX)
}

fn validate_real(field: &'static str, value: f64, min: f64, max: f64) -> ScoreResult<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(ScoreError::invalid_observation(field, value));
    }
    Ok(value)
}
