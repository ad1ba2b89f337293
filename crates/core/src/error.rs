use chrono::{DateTime, Utc};
use mediscore_types::{InvalidModeError, NameError};

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("invalid observation: {field} = {value}")]
    InvalidObservation { field: &'static str, value: String },
    #[error("invalid mode: {0}")]
    InvalidMode(#[from] InvalidModeError),
    #[error(
        "observation at {current} is earlier than the previous observation at {previous}",
        current = current.to_rfc3339(),
        previous = previous.to_rfc3339()
    )]
    OutOfOrder {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid patient name: {0}")]
    Name(#[from] NameError),
}

impl ScoreError {
    pub(crate) fn invalid_observation(field: &'static str, value: impl ToString) -> Self {
        ScoreError::InvalidObservation {
            field,
            value: value.to_string(),
        }
    }
}

pub type ScoreResult<T> = std::result::Result<T, ScoreError>;
