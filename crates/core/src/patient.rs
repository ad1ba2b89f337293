//! Patient entity.
//!
//! A `Patient` owns its current observations and its trend state. Scoring and the trend update
//! happen together in [`Patient::evaluate`], which takes `&mut self`, so one patient's
//! evaluations can never interleave.

use crate::breakdown::{self, ScoreBreakdown};
use crate::observations::Observations;
use crate::trend::{PriorScore, TrendMonitor, TrendOutcome};
use crate::{CoreConfig, ScoreError, ScoreResult};
use chrono::{DateTime, Utc};
use mediscore_types::PatientName;
use serde::Serialize;
use std::sync::Arc;

/// Result of one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub observed_at: DateTime<Utc>,
    pub breakdown: ScoreBreakdown,
    pub trend: TrendOutcome,
}

#[derive(Clone, Debug)]
pub struct Patient {
    name: PatientName,
    observations: Observations,
    observed_at: DateTime<Utc>,
    trend: TrendMonitor,
    latest: Option<ScoreBreakdown>,
}

impl Patient {
    /// Creates a patient with an initial set of observations taken at `observed_at`.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::Name` if `name` is empty.
    pub fn new(
        cfg: Arc<CoreConfig>,
        name: impl AsRef<str>,
        observations: Observations,
        observed_at: DateTime<Utc>,
    ) -> ScoreResult<Self> {
        let name = PatientName::new(name)?;
        Ok(Self {
            name,
            observations,
            observed_at,
            trend: TrendMonitor::new(cfg.trend_policy()),
            latest: None,
        })
    }

    /// Replaces every observation at once.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfOrder` if `observed_at` is earlier than the current observation
    /// time; the patient is left unchanged.
    pub fn update(
        &mut self,
        observations: Observations,
        observed_at: DateTime<Utc>,
    ) -> ScoreResult<()> {
        if observed_at < self.observed_at {
            return Err(ScoreError::OutOfOrder {
                previous: self.observed_at,
                current: observed_at,
            });
        }

        tracing::debug!(patient = %self.name, %observed_at, "observations updated");
        self.observations = observations;
        self.observed_at = observed_at;
        Ok(())
    }

    /// Scores the current observations and advances the trend state.
    ///
    /// On error neither the trend state nor the latest breakdown is modified.
    pub fn evaluate(&mut self) -> ScoreResult<Evaluation> {
        let breakdown = breakdown::evaluate(&self.observations)?;
        let trend = self
            .trend
            .record_evaluation(breakdown.final_score(), self.observed_at)?;

        tracing::info!(
            patient = %self.name,
            final_score = breakdown.final_score(),
            "patient evaluated"
        );

        self.latest = Some(breakdown.clone());
        Ok(Evaluation {
            observed_at: self.observed_at,
            breakdown,
            trend,
        })
    }

    pub fn name(&self) -> &PatientName {
        &self.name
    }

    pub fn observations(&self) -> &Observations {
        &self.observations
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// The breakdown produced by the most recent successful evaluation.
    pub fn latest_breakdown(&self) -> Option<&ScoreBreakdown> {
        self.latest.as_ref()
    }

    pub fn prior_score(&self) -> Option<PriorScore> {
        self.trend.prior()
    }
}
