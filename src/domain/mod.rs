//! Domain layer: Core clinical types and the two calculation engines.
//!
//! This module contains pure Rust types with no I/O.
//! Scoring tables are immutable statics handed out by reference.

pub mod cardio;
mod patient;
pub mod renal;
mod tables;

pub use cardio::{
    CardioAssessment, CardioRiskClass, Factor, LookupMissPolicy, ScoreBreakdown, ScoreStep,
    ScoringTable,
};
pub use patient::{CardioInputs, Ethnicity, RenalInputs, Sex};
pub use renal::{RenalAssessment, RenalStage};
