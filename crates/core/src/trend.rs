//! Score trend tracking.
//!
//! A [`TrendMonitor`] remembers exactly one prior final score and the time it was taken. Each
//! new evaluation is classified against that prior score and then replaces it.

use crate::constants::{DEFAULT_ALERT_THRESHOLD, DEFAULT_TREND_WINDOW_HOURS};
use crate::{ScoreError, ScoreResult};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How scores are compared over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrendPolicy {
    /// Prior scores older than this are not compared.
    pub window: Duration,
    /// A change must be strictly greater than this to alert.
    pub alert_threshold: u32,
    /// Whether a fall in score alerts as well as a rise.
    pub track_decreases: bool,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            window: Duration::hours(DEFAULT_TREND_WINDOW_HOURS),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            track_decreases: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increase,
    Decrease,
}

/// Classification of a new score against the prior one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum TrendOutcome {
    NoPriorScore,
    StalePriorScore,
    Alert { direction: Direction, delta: i64 },
    NoSignificantChange { delta: i64 },
}

impl TrendOutcome {
    pub fn is_alert(&self) -> bool {
        matches!(self, TrendOutcome::Alert { .. })
    }
}

/// The retained prior score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PriorScore {
    pub final_score: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct TrendMonitor {
    policy: TrendPolicy,
    prior: Option<PriorScore>,
}

impl TrendMonitor {
    pub fn new(policy: TrendPolicy) -> Self {
        Self {
            policy,
            prior: None,
        }
    }

    pub fn prior(&self) -> Option<PriorScore> {
        self.prior
    }

    pub fn policy(&self) -> TrendPolicy {
        self.policy
    }

    /// Classify `final_score` against the prior score and make it the new prior.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfOrder` if `timestamp` is earlier than the prior score's. The
    /// retained prior is left unchanged in that case.
    pub fn record_evaluation(
        &mut self,
        final_score: u32,
        timestamp: DateTime<Utc>,
    ) -> ScoreResult<TrendOutcome> {
        let outcome = match self.prior {
            None => TrendOutcome::NoPriorScore,
            Some(prior) => {
                if timestamp < prior.timestamp {
                    return Err(ScoreError::OutOfOrder {
                        previous: prior.timestamp,
                        current: timestamp,
                    });
                }
                self.classify(prior, final_score, timestamp)
            }
        };

        match outcome {
            TrendOutcome::Alert { direction, delta } => {
                tracing::warn!(?direction, delta, final_score, "MediScore trend alert");
            }
            other => {
                tracing::info!(outcome = ?other, final_score, "MediScore trend checked");
            }
        }

        self.prior = Some(PriorScore {
            final_score,
            timestamp,
        });
        Ok(outcome)
    }

    fn classify(
        &self,
        prior: PriorScore,
        final_score: u32,
        timestamp: DateTime<Utc>,
    ) -> TrendOutcome {
        if timestamp - prior.timestamp > self.policy.window {
            return TrendOutcome::StalePriorScore;
        }

        let delta = i64::from(final_score) - i64::from(prior.final_score);
        let threshold = i64::from(self.policy.alert_threshold);

        if delta > threshold {
            TrendOutcome::Alert {
                direction: Direction::Increase,
                delta,
            }
        } else if self.policy.track_decreases && delta < -threshold {
            TrendOutcome::Alert {
                direction: Direction::Decrease,
                delta,
            }
        } else {
            TrendOutcome::NoSignificantChange { delta }
        }
    }
}
