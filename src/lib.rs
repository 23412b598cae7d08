//! # riskcalc
//!
//! Clinical risk calculators for form-submitted patient attributes.
//!
//! This crate provides:
//! - eGFR estimation (CKD-EPI 2009) and G1..G5 staging
//! - 10-year cardiovascular risk from sex-specific point tables
//! - A form-field adapter and a small CLI around both calculators
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Patient attributes, the two engines and their static tables
//! - `ports`: Trait definitions for pluggable collaborators (score observer)
//! - `adapters`: Concrete implementations (tracing observer, form parsing)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Runtime configuration from the environment

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use config::CalculatorConfig;
pub use domain::{
    CardioAssessment, CardioInputs, CardioRiskClass, Ethnicity, LookupMissPolicy,
    RenalAssessment, RenalInputs, RenalStage, Sex,
};

/// Result type for riskcalc operations
pub type Result<T> = std::result::Result<T, RiskcalcError>;

/// Main error type for riskcalc
#[derive(Debug, thiserror::Error)]
pub enum RiskcalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No {factor} band contains value {value}")]
    TableLookupMiss { factor: domain::Factor, value: f64 },

    #[error("Score {score} has no risk percentage entry for sex {sex}")]
    ScoreNotInTable { score: i32, sex: Sex },

    #[error("Configuration error: {0}")]
    Config(String),
}
