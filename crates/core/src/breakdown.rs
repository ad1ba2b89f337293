//! Score aggregation.
//!
//! [`evaluate`] runs every applicable scoring rule over a record and returns a fresh
//! [`ScoreBreakdown`]. It does not touch trend state; that is the caller's job.

use crate::constants::FINAL_SCORE_LABEL;
use crate::observations::Observations;
use crate::rules;
use crate::ScoreResult;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// A scored parameter, in the order it appears in a breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parameter {
    AirOrOxygen,
    Consciousness,
    RespirationRate,
    Spo2,
    Temperature,
    BloodGlucose,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::AirOrOxygen,
        Parameter::Consciousness,
        Parameter::RespirationRate,
        Parameter::Spo2,
        Parameter::Temperature,
        Parameter::BloodGlucose,
    ];

    /// Breakdown label for this parameter's points.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::AirOrOxygen => "Air or Oxygen Score",
            Parameter::Consciousness => "Consciousness Score",
            Parameter::RespirationRate => "Respiration Range Score",
            Parameter::Spo2 => "SpO2 Score",
            Parameter::Temperature => "Temperature Score",
            Parameter::BloodGlucose => "CBG Score",
        }
    }

    /// Row heading used when the breakdown is rendered as a table.
    pub fn property(self) -> &'static str {
        match self {
            Parameter::AirOrOxygen => "Air or Oxygen",
            Parameter::Consciousness => "Consciousness",
            Parameter::RespirationRate => "Respiration Range",
            Parameter::Spo2 => "SpO2",
            Parameter::Temperature => "Temperature",
            Parameter::BloodGlucose => "CBG",
        }
    }
}

/// Points per parameter plus their sum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBreakdown {
    scores: BTreeMap<Parameter, u32>,
    final_score: u32,
}

impl ScoreBreakdown {
    fn from_scores(scores: BTreeMap<Parameter, u32>) -> Self {
        let final_score = scores.values().sum();
        Self {
            scores,
            final_score,
        }
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    /// Points for `parameter`, or `None` when it was not scored (CBG without a reading).
    pub fn get(&self, parameter: Parameter) -> Option<u32> {
        self.scores.get(&parameter).copied()
    }

    /// Look up an entry by its label, including `"Final Score"`.
    pub fn get_label(&self, label: &str) -> Option<u32> {
        if label == FINAL_SCORE_LABEL {
            return Some(self.final_score);
        }
        self.scores
            .iter()
            .find(|(parameter, _)| parameter.label() == label)
            .map(|(_, points)| *points)
    }

    /// Scored parameters in breakdown order, excluding the final score.
    pub fn iter(&self) -> impl Iterator<Item = (Parameter, u32)> + '_ {
        self.scores.iter().map(|(parameter, points)| (*parameter, *points))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Serialize for ScoreBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.scores.len() + 1))?;
        for (parameter, points) in &self.scores {
            map.serialize_entry(parameter.label(), points)?;
        }
        map.serialize_entry(FINAL_SCORE_LABEL, &self.final_score)?;
        map.end()
    }
}

/// Score a record.
///
/// The record is re-validated first; if any value is out of bounds no breakdown is produced.
///
/// # Errors
///
/// Returns `ScoreError::InvalidObservation` naming the offending field and value.
pub fn evaluate(observations: &Observations) -> ScoreResult<ScoreBreakdown> {
    observations.validate()?;

    let support = observations.respiratory_support();
    let mut scores = BTreeMap::new();
    scores.insert(
        Parameter::AirOrOxygen,
        rules::respiratory_support_score(support),
    );
    scores.insert(
        Parameter::Consciousness,
        rules::consciousness_score(observations.consciousness()),
    );
    scores.insert(
        Parameter::RespirationRate,
        rules::respiration_rate_score(observations.respiration_rate()),
    );
    scores.insert(
        Parameter::Spo2,
        rules::spo2_score(support, observations.oxygen_saturation()),
    );
    scores.insert(
        Parameter::Temperature,
        rules::temperature_score(observations.temperature()),
    );
    if let Some(cbg) = observations.blood_glucose() {
        scores.insert(
            Parameter::BloodGlucose,
            rules::blood_glucose_score(cbg.fasting(), cbg.mmol_per_l()),
        );
    }

    let breakdown = ScoreBreakdown::from_scores(scores);
    tracing::debug!(
        final_score = breakdown.final_score(),
        parameters = breakdown.len(),
        "evaluated MediScore"
    );
    Ok(breakdown)
}
