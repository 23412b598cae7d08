//! Patient attribute types consumed by the two calculators.
//!
//! Values arrive already parsed; `validate()` is a boundary helper and is
//! never called by the engines themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RiskcalcError;

/// Biological sex, selecting formula branches and scoring tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = RiskcalcError;

    /// Accepts English and Portuguese form values, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "masculino" | "m" => Ok(Self::Male),
            "female" | "feminino" | "f" => Ok(Self::Female),
            other => Err(RiskcalcError::InvalidInput(format!(
                "Unrecognized sex {other:?} (expected male or female)"
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Self-reported ethnicity. Only `Black` and `MixedRace` change the eGFR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ethnicity {
    Black,
    MixedRace,
    Other,
}

impl Ethnicity {
    /// Map a free-form label onto an ethnicity. Never fails: unknown
    /// labels are `Other`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "black" | "preto" => Self::Black,
            "mixed-race" | "pardo" => Self::MixedRace,
            _ => Self::Other,
        }
    }

    /// Multiplier applied to the CKD-EPI estimate.
    #[must_use]
    pub fn egfr_multiplier(&self) -> f64 {
        match self {
            Self::Black | Self::MixedRace => 1.159,
            Self::Other => 1.0,
        }
    }
}

/// Inputs for the eGFR calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenalInputs {
    /// Age in years
    pub age: u32,
    pub sex: Sex,
    pub ethnicity: Ethnicity,
    /// Serum creatinine in mg/dL
    pub creatinine: f64,
}

impl RenalInputs {
    /// Reject values the formula cannot use: non-finite or non-positive
    /// creatinine.
    ///
    /// # Errors
    /// Returns every violation as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.creatinine.is_finite() && self.creatinine > 0.0) {
            errors.push(format!("Creatinine {} must be a positive number", self.creatinine));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Values outside typical clinical ranges. Informational only.
    #[must_use]
    pub fn plausibility_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.age > TYPICAL_MAX_AGE {
            warnings.push(format!("Age {} above {TYPICAL_MAX_AGE}", self.age));
        }
        if self.creatinine > 20.0 {
            warnings.push(format!("Creatinine {} above 20 mg/dL", self.creatinine));
        }

        warnings
    }
}

/// Inputs for the cardiovascular risk calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardioInputs {
    /// Age in years
    pub age: u32,
    pub sex: Sex,
    /// HDL cholesterol in mg/dL
    pub hdl: f64,
    /// Total cholesterol in mg/dL
    pub total_cholesterol: f64,
    /// Systolic blood pressure in mmHg
    pub systolic_bp: f64,
    /// Under treatment for hypertension
    pub bp_treated: bool,
    pub diabetic: bool,
    pub smoker: bool,
}

impl CardioInputs {
    /// Reject non-finite measurements. Out-of-band values are left to the
    /// lookup miss policy.
    ///
    /// # Errors
    /// Returns every violation as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .measurements()
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, value)| format!("{name} {value} is not a finite number"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Values outside typical clinical ranges. Informational only.
    #[must_use]
    pub fn plausibility_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.age > TYPICAL_MAX_AGE {
            warnings.push(format!("Age {} above {TYPICAL_MAX_AGE}", self.age));
        }
        let ranges = [(5.0, 200.0), (50.0, 600.0), (50.0, 300.0)];
        for ((name, value), (low, high)) in self.measurements().into_iter().zip(ranges) {
            if !(low..=high).contains(&value) {
                warnings.push(format!("{name} {value} outside typical range [{low}, {high}]"));
            }
        }

        warnings
    }

    fn measurements(&self) -> [(&'static str, f64); 3] {
        [
            ("HDL cholesterol", self.hdl),
            ("Total cholesterol", self.total_cholesterol),
            ("Systolic BP", self.systolic_bp),
        ]
    }
}

const TYPICAL_MAX_AGE: u32 = 120;
