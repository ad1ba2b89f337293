//! # MediScore Core
//!
//! Scoring engine for the MediScore early-warning score.
//!
//! This crate contains pure, in-memory clinical logic:
//! - validated vital-sign records ([`observations`])
//! - per-parameter range tables ([`rules`]) and their aggregation ([`breakdown`])
//! - score trend tracking within a rolling window ([`trend`])
//! - the patient entity tying these together ([`patient`])
//! - stateless text rendering of a breakdown ([`report`])
//!
//! **No process concerns**: reading the environment, logging setup and argument parsing belong
//! in the `mediscore-run` and `mediscore-cli` binaries.

pub mod breakdown;
pub mod config;
pub mod constants;
pub mod error;
pub mod observations;
pub mod patient;
pub mod report;
pub mod rules;
pub mod trend;
pub mod validation;

pub use breakdown::{evaluate, Parameter, ScoreBreakdown};
pub use config::CoreConfig;
pub use error::{ScoreError, ScoreResult};
pub use observations::{BloodGlucose, Observations};
pub use patient::{Evaluation, Patient};
pub use trend::{Direction, TrendMonitor, TrendOutcome, TrendPolicy};

pub use mediscore_types::{
    Consciousness, ImpairmentLevel, InvalidModeError, PatientName, RespiratorySupport,
};
