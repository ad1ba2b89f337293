//! Shared observation types for MediScore.
//!
//! These are the categorical observations recorded at the bedside, plus the validated patient
//! name. Both the scoring core and the command line depend on this crate so that observation
//! codes are decoded in exactly one place.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating a patient name.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    /// The input text was empty or contained only whitespace
    #[error("patient name cannot be empty")]
    Empty,
}

/// An observation code that does not correspond to any mode of the named parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {parameter} code: {code}")]
pub struct InvalidModeError {
    pub parameter: &'static str,
    pub code: i64,
}

/// A patient display name that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction. The name is
/// printed at the head of every score table and in trend messages, and serialises as a plain
/// string. Deserialisation goes through [`PatientName::new`], so a blank name in JSON or YAML
/// is rejected rather than accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientName(String);

impl PatientName {
    /// Creates a new `PatientName`, rejecting empty or whitespace-only input.
    pub fn new(input: impl AsRef<str>) -> Result<Self, NameError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the trimmed name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PatientName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Validates on the way in; see [`PatientName::new`].
impl<'de> Deserialize<'de> for PatientName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientName::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Whether the patient is breathing room air or receiving supplementary oxygen.
///
/// The bedside code for each mode is the same as its MediScore contribution:
/// `0` for air and `2` for oxygen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespiratorySupport {
    Air,
    Oxygen,
}

impl RespiratorySupport {
    pub const PARAMETER: &'static str = "air or oxygen";

    /// The observation code recorded on the chart.
    pub fn code(self) -> i64 {
        match self {
            RespiratorySupport::Air => 0,
            RespiratorySupport::Oxygen => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RespiratorySupport::Air => "air",
            RespiratorySupport::Oxygen => "oxygen",
        }
    }
}

impl TryFrom<i64> for RespiratorySupport {
    type Error = InvalidModeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RespiratorySupport::Air),
            2 => Ok(RespiratorySupport::Oxygen),
            _ => Err(InvalidModeError {
                parameter: Self::PARAMETER,
                code,
            }),
        }
    }
}

impl std::fmt::Display for RespiratorySupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graded severity of impaired consciousness, least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ImpairmentLevel {
    Mild = 1,
    Moderate = 2,
    Severe = 3,
}

impl ImpairmentLevel {
    pub fn level(self) -> i64 {
        self as i64
    }
}

/// Level of consciousness.
///
/// Chart codes: `0` is alert, `1..=3` is impaired at that severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consciousness {
    Alert,
    Impaired(ImpairmentLevel),
}

impl Consciousness {
    pub const PARAMETER: &'static str = "consciousness";

    /// The observation code recorded on the chart.
    pub fn code(self) -> i64 {
        match self {
            Consciousness::Alert => 0,
            Consciousness::Impaired(level) => level.level(),
        }
    }

    pub fn is_alert(self) -> bool {
        matches!(self, Consciousness::Alert)
    }
}

impl TryFrom<i64> for Consciousness {
    type Error = InvalidModeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Consciousness::Alert),
            1 => Ok(Consciousness::Impaired(ImpairmentLevel::Mild)),
            2 => Ok(Consciousness::Impaired(ImpairmentLevel::Moderate)),
            3 => Ok(Consciousness::Impaired(ImpairmentLevel::Severe)),
            _ => Err(InvalidModeError {
                parameter: Self::PARAMETER,
                code,
            }),
        }
    }
}
