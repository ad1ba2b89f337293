//! Constants used throughout the MediScore core crate.
//!
//! Physiological bounds, breakdown labels and trend defaults live here so that validation,
//! scoring and presentation agree on them.

/// Lowest accepted oxygen saturation, percent.
pub const SPO2_MIN: u8 = 0;

/// Highest accepted oxygen saturation, percent.
pub const SPO2_MAX: u8 = 100;

/// Lowest accepted temperature, degrees Celsius.
pub const TEMPERATURE_MIN: f64 = 0.0;

/// Highest accepted temperature, degrees Celsius.
pub const TEMPERATURE_MAX: f64 = 45.0;

/// Lowest accepted capillary blood glucose, mmol/L.
pub const CBG_MIN: f64 = 0.0;

/// Highest accepted capillary blood glucose, mmol/L.
pub const CBG_MAX: f64 = 45.0;

/// Breakdown label for the summed score.
pub const FINAL_SCORE_LABEL: &str = "Final Score";

/// Default window within which a prior score is compared, in hours.
pub const DEFAULT_TREND_WINDOW_HOURS: i64 = 24;

/// Default score change that must be exceeded to raise an alert.
pub const DEFAULT_ALERT_THRESHOLD: u32 = 2;

/// Environment variable overriding the trend window.
pub const TREND_WINDOW_ENV: &str = "MEDISCORE_TREND_WINDOW_HOURS";

/// Environment variable overriding the alert threshold.
pub const ALERT_THRESHOLD_ENV: &str = "MEDISCORE_ALERT_THRESHOLD";

/// Environment variable toggling alerts on falling scores.
pub const TRACK_DECREASES_ENV: &str = "MEDISCORE_TRACK_DECREASES";
