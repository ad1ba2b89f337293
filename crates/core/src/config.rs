//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into patients as an `Arc<CoreConfig>`. Nothing in here reads the process environment;
//! binaries read the variables and hand the raw values to the `*_from_env_value` parsers.

use crate::constants::{DEFAULT_ALERT_THRESHOLD, DEFAULT_TREND_WINDOW_HOURS};
use crate::trend::TrendPolicy;
use crate::{ScoreError, ScoreResult};
use chrono::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    trend_policy: TrendPolicy,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The trend window must be at least one hour long.
    pub fn new(
        trend_window_hours: i64,
        alert_threshold: u32,
        track_decreases: bool,
    ) -> ScoreResult<Self> {
        if trend_window_hours <= 0 {
            return Err(ScoreError::InvalidInput(
                "trend window must be a positive number of hours".into(),
            ));
        }

        let window = Duration::try_hours(trend_window_hours)
            .ok_or_else(|| ScoreError::InvalidInput("trend window is too large".into()))?;

        Ok(Self {
            trend_policy: TrendPolicy {
                window,
                alert_threshold,
                track_decreases,
            },
        })
    }

    /// Build a configuration from optional raw values, as read from the environment.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_env_values(
        trend_window_hours: Option<String>,
        alert_threshold: Option<String>,
        track_decreases: Option<String>,
    ) -> ScoreResult<Self> {
        Self::new(
            trend_window_hours_from_env_value(trend_window_hours)?,
            alert_threshold_from_env_value(alert_threshold)?,
            track_decreases_from_env_value(track_decreases)?,
        )
    }

    pub fn trend_policy(&self) -> TrendPolicy {
        self.trend_policy
    }

    pub fn trend_window(&self) -> Duration {
        self.trend_policy.window
    }

    pub fn alert_threshold(&self) -> u32 {
        self.trend_policy.alert_threshold
    }

    pub fn track_decreases(&self) -> bool {
        self.trend_policy.track_decreases
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the trend window (hours) from an optional string value.
pub fn trend_window_hours_from_env_value(value: Option<String>) -> ScoreResult<i64> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_TREND_WINDOW_HOURS);
    };

    value.parse::<i64>().map_err(|_| {
        ScoreError::InvalidInput(format!("trend window hours is not an integer: {value}"))
    })
}

/// Parse the alert threshold from an optional string value.
pub fn alert_threshold_from_env_value(value: Option<String>) -> ScoreResult<u32> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_ALERT_THRESHOLD);
    };

    value.parse::<u32>().map_err(|_| {
        ScoreError::InvalidInput(format!(
            "alert threshold is not a non-negative integer: {value}"
        ))
    })
}

/// Parse the decrease-tracking flag from an optional string value.
///
/// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, case-insensitively.
pub fn track_decreases_from_env_value(value: Option<String>) -> ScoreResult<bool> {
    let Some(value) = non_blank(value) else {
        return Ok(true);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ScoreError::InvalidInput(format!(
            "track decreases is not a boolean: {value}"
        ))),
    }
}
