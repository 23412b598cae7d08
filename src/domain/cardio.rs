//! Point-based 10-year cardiovascular risk.
//!
//! Each factor contributes points from a sex-specific table; the total
//! maps to a risk percentage which is then banded Low / Intermediate /
//! High with sex-specific cut-offs.

use serde::{Deserialize, Serialize};

use super::patient::{CardioInputs, Sex};
use super::tables;
use crate::{Result, RiskcalcError};

/// Risk percentage reported for scores at or below the table floor.
pub const FLOOR_RISK_PERCENT: f64 = 0.90;

/// Risk percentage reported for scores at or above the table ceiling.
pub const CEILING_RISK_PERCENT: f64 = 30.1;

/// A contributor to the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Age in years
    Age,
    /// HDL cholesterol
    Hdl,
    /// Total cholesterol
    TotalCholesterol,
    /// Systolic blood pressure, treated or untreated table
    SystolicBp,
    /// Current smoker adder
    Smoking,
    /// Diabetes adder
    Diabetes,
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Age => "age",
            Self::Hdl => "HDL",
            Self::TotalCholesterol => "total cholesterol",
            Self::SystolicBp => "systolic BP",
            Self::Smoking => "smoking",
            Self::Diabetes => "diabetes",
        };
        write!(f, "{name}")
    }
}

/// What to do when a factor value falls in no band and is below the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMissPolicy {
    /// Fail with `TableLookupMiss`
    #[default]
    Reject,
    /// Contribute zero points
    ZeroPoints,
    /// Use the points of the nearest band
    Clamp,
}

impl std::str::FromStr for LookupMissPolicy {
    type Err = RiskcalcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "zero" | "zero_points" => Ok(Self::ZeroPoints),
            "clamp" => Ok(Self::Clamp),
            other => Err(RiskcalcError::Config(format!(
                "Unknown lookup miss policy {other:?} (expected reject, zero or clamp)"
            ))),
        }
    }
}

/// Half-open value range `[lower, upper)` worth `points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsBand {
    pub lower: f64,
    pub upper: f64,
    pub points: i32,
}

impl PointsBand {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

/// Values `>= threshold` score `points` without a band scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ceiling {
    pub threshold: f64,
    pub points: i32,
}

/// Ordered, disjoint bands for one factor.
#[derive(Debug, Clone, Copy)]
pub struct FactorTable {
    pub factor: Factor,
    pub bands: &'static [PointsBand],
    pub ceiling: Option<Ceiling>,
}

impl FactorTable {
    /// Points for `value`.
    ///
    /// # Errors
    /// Returns `TableLookupMiss` when no band matches and the policy is
    /// `Reject`, or when `Clamp` has no sensible neighbor (NaN).
    pub fn points(&self, value: f64, policy: LookupMissPolicy) -> Result<i32> {
        if let Some(cap) = self.ceiling {
            if value >= cap.threshold {
                return Ok(cap.points);
            }
        }

        if let Some(band) = self.bands.iter().find(|b| b.contains(value)) {
            return Ok(band.points);
        }

        let miss = RiskcalcError::TableLookupMiss {
            factor: self.factor,
            value,
        };
        match policy {
            LookupMissPolicy::Reject => Err(miss),
            LookupMissPolicy::ZeroPoints => Ok(0),
            LookupMissPolicy::Clamp => {
                let (Some(first), Some(last)) = (self.bands.first(), self.bands.last()) else {
                    return Err(miss);
                };
                if value < first.lower {
                    Ok(first.points)
                } else if value >= last.upper {
                    Ok(last.points)
                } else {
                    Err(miss)
                }
            }
        }
    }
}

/// Score → risk percentage for one sex.
#[derive(Debug, Clone, Copy)]
pub struct PercentTable {
    /// Scores at or below this report `FLOOR_RISK_PERCENT`
    pub floor_score: i32,
    /// Scores at or above this report `CEILING_RISK_PERCENT`
    pub ceiling_score: i32,
    pub entries: &'static [(i32, f64)],
}

impl PercentTable {
    /// Exact-score lookup with floor/ceiling overrides.
    #[must_use]
    pub fn percentage(&self, score: i32) -> Option<f64> {
        if score <= self.floor_score {
            Some(FLOOR_RISK_PERCENT)
        } else if score >= self.ceiling_score {
            Some(CEILING_RISK_PERCENT)
        } else {
            self.entries
                .iter()
                .find(|&&(s, _)| s == score)
                .map(|&(_, pct)| pct)
        }
    }
}

/// Complete table set for one sex.
#[derive(Debug)]
pub struct ScoringTable {
    pub sex: Sex,
    pub age: FactorTable,
    pub hdl: FactorTable,
    pub total_cholesterol: FactorTable,
    pub sbp_untreated: FactorTable,
    pub sbp_treated: FactorTable,
    pub smoker_points: i32,
    pub diabetic_points: i32,
    pub percentages: PercentTable,
}

impl ScoringTable {
    #[must_use]
    pub fn for_sex(sex: Sex) -> &'static Self {
        match sex {
            Sex::Male => &tables::MALE,
            Sex::Female => &tables::FEMALE,
        }
    }

    /// Systolic BP table matching the treatment flag.
    #[must_use]
    pub fn sbp(&self, treated: bool) -> &FactorTable {
        if treated {
            &self.sbp_treated
        } else {
            &self.sbp_untreated
        }
    }
}

/// Snapshot taken after one factor has been added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreStep {
    pub factor: Factor,
    pub points: i32,
    /// Running total including this factor
    pub subtotal: i32,
}

/// Per-factor contributions in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub steps: [ScoreStep; 6],
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.steps[5].subtotal
    }
}

/// Sum the factor points for `inputs` against `table`.
///
/// The table's sex is authoritative; `inputs.sex` is not consulted here.
///
/// # Errors
/// Returns `TableLookupMiss` for an unmatched factor under `Reject`.
pub fn compute_score(
    inputs: &CardioInputs,
    table: &ScoringTable,
    policy: LookupMissPolicy,
) -> Result<ScoreBreakdown> {
    let contributions = [
        (Factor::Age, table.age.points(f64::from(inputs.age), policy)?),
        (Factor::Hdl, table.hdl.points(inputs.hdl, policy)?),
        (
            Factor::TotalCholesterol,
            table.total_cholesterol.points(inputs.total_cholesterol, policy)?,
        ),
        (
            Factor::SystolicBp,
            table.sbp(inputs.bp_treated).points(inputs.systolic_bp, policy)?,
        ),
        (
            Factor::Smoking,
            if inputs.smoker { table.smoker_points } else { 0 },
        ),
        (
            Factor::Diabetes,
            if inputs.diabetic { table.diabetic_points } else { 0 },
        ),
    ];

    let mut subtotal = 0;
    let steps = contributions.map(|(factor, points)| {
        subtotal += points;
        ScoreStep {
            factor,
            points,
            subtotal,
        }
    });

    Ok(ScoreBreakdown { steps })
}

/// Convert a total score into a 10-year risk percentage.
///
/// # Errors
/// Returns `ScoreNotInTable` when an in-range score has no entry.
pub fn score_to_percentage(score: i32, sex: Sex) -> Result<f64> {
    ScoringTable::for_sex(sex)
        .percentages
        .percentage(score)
        .ok_or(RiskcalcError::ScoreNotInTable { score, sex })
}

/// Cardiovascular risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardioRiskClass {
    /// Below 5% 10-year risk
    Low,
    /// From 5% up to 10% (women) or 20% (men)
    Intermediate,
    /// At or above the intermediate ceiling
    High,
}

impl CardioRiskClass {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Intermediate => "Intermediate risk",
            Self::High => "High risk",
        }
    }
}

impl std::fmt::Display for CardioRiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Intermediate => write!(f, "INTERMEDIATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Band a risk percentage. The intermediate ceiling is 10% for women and
/// 20% for men.
#[must_use]
pub fn classify_risk(percentage: f64, sex: Sex) -> CardioRiskClass {
    let intermediate_limit = match sex {
        Sex::Female => 10.0,
        Sex::Male => 20.0,
    };

    if percentage < 5.0 {
        CardioRiskClass::Low
    } else if percentage < intermediate_limit {
        CardioRiskClass::Intermediate
    } else {
        CardioRiskClass::High
    }
}

/// Cardiovascular result record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardioAssessment {
    pub score: i32,
    pub classification: CardioRiskClass,
    pub label: &'static str,
    /// 10-year risk in percent
    pub percentage: f64,
}

impl CardioAssessment {
    /// Build the record for an already computed score.
    ///
    /// # Errors
    /// Returns `ScoreNotInTable` when the score has no percentage entry.
    pub fn from_score(score: i32, sex: Sex) -> Result<Self> {
        let percentage = score_to_percentage(score, sex)?;
        let classification = classify_risk(percentage, sex);
        Ok(Self {
            score,
            classification,
            label: classification.label(),
            percentage,
        })
    }
}

/// Score, convert and classify in one pass.
///
/// # Errors
/// Propagates lookup failures from scoring and percentage conversion.
pub fn assess(inputs: &CardioInputs, policy: LookupMissPolicy) -> Result<CardioAssessment> {
    let breakdown = compute_score(inputs, ScoringTable::for_sex(inputs.sex), policy)?;
    CardioAssessment::from_score(breakdown.total(), inputs.sex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn male_smoker() -> CardioInputs {
        CardioInputs {
            age: 55,
            sex: Sex::Male,
            hdl: 45.0,
            total_cholesterol: 210.0,
            systolic_bp: 138.0,
            bp_treated: false,
            diabetic: false,
            smoker: true,
        }
    }

    #[test]
    fn test_male_breakdown() {
        let inputs = male_smoker();
        let breakdown =
            compute_score(&inputs, ScoringTable::for_sex(Sex::Male), LookupMissPolicy::Reject)
                .expect("Should score");

        let points: Vec<i32> = breakdown.steps.iter().map(|s| s.points).collect();
        // age 55-59, HDL 45-49, chol 200-239, SBP 130-139 untreated, smoker
        assert_eq!(points, vec![10, 0, 2, 1, 4, 0]);
        assert_eq!(breakdown.total(), 17);
        assert_eq!(breakdown.steps[2].subtotal, 12);

        let assessment = assess(&inputs, LookupMissPolicy::Reject).expect("Should assess");
        assert!((assessment.percentage - 29.4).abs() < f64::EPSILON);
        assert_eq!(assessment.classification, CardioRiskClass::High);
    }

    #[test]
    fn test_female_treated_bp_and_ceilings() {
        let inputs = CardioInputs {
            age: 80,
            sex: Sex::Female,
            hdl: 65.0,
            total_cholesterol: 300.0,
            systolic_bp: 170.0,
            bp_treated: true,
            diabetic: true,
            smoker: false,
        };
        let breakdown =
            compute_score(&inputs, ScoringTable::for_sex(Sex::Female), LookupMissPolicy::Reject)
                .expect("Should score");
        // 15 (age) - 2 (HDL) + 5 (chol) + 7 (treated SBP) + 0 + 4 (diabetes)
        assert_eq!(breakdown.total(), 29);

        let untreated = CardioInputs {
            bp_treated: false,
            ..inputs
        };
        let breakdown =
            compute_score(&untreated, ScoringTable::for_sex(Sex::Female), LookupMissPolicy::Reject)
                .expect("Should score");
        assert_eq!(breakdown.steps[3].points, 5);
    }

    #[test]
    fn test_fractional_values_fall_in_lower_band() {
        let table = ScoringTable::for_sex(Sex::Female);
        assert_eq!(table.hdl.points(49.5, LookupMissPolicy::Reject).expect("Should match"), 0);
        assert_eq!(table.sbp_untreated.points(119.9, LookupMissPolicy::Reject).expect("Should match"), -3);
        assert_eq!(table.sbp_untreated.points(120.0, LookupMissPolicy::Reject).expect("Should match"), 0);
    }

    #[test]
    fn test_lookup_miss_policies() {
        let age = &ScoringTable::for_sex(Sex::Male).age;

        let err = age.points(25.0, LookupMissPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            RiskcalcError::TableLookupMiss { factor: Factor::Age, .. }
        ));
        assert_eq!(age.points(25.0, LookupMissPolicy::ZeroPoints).expect("Should default"), 0);
        assert_eq!(age.points(25.0, LookupMissPolicy::Clamp).expect("Should clamp"), 0);
        assert!(age.points(f64::NAN, LookupMissPolicy::Clamp).is_err());

        let hdl = &ScoringTable::for_sex(Sex::Male).hdl;
        assert_eq!(hdl.points(-1.0, LookupMissPolicy::Clamp).expect("Should clamp"), 2);
    }

    #[test]
    fn test_young_patient_rejected_by_default() {
        let inputs = CardioInputs {
            age: 25,
            ..male_smoker()
        };
        assert!(assess(&inputs, LookupMissPolicy::Reject).is_err());
        let lenient = assess(&inputs, LookupMissPolicy::ZeroPoints).expect("Should assess");
        assert_eq!(lenient.score, 7);
    }

    #[test]
    fn test_percentage_boundaries() {
        let pct = |score, sex| score_to_percentage(score, sex).expect("Should convert");
        assert!((pct(-2, Sex::Female) - 0.90).abs() < f64::EPSILON);
        assert!((pct(-7, Sex::Female) - 0.90).abs() < f64::EPSILON);
        assert!((pct(21, Sex::Female) - 30.1).abs() < f64::EPSILON);
        assert!((pct(-1, Sex::Female) - 1.0).abs() < f64::EPSILON);
        assert!((pct(19, Sex::Female) - 24.8).abs() < f64::EPSILON);
        assert!((pct(20, Sex::Female) - 27.5).abs() < f64::EPSILON);
        assert!((pct(-3, Sex::Male) - 0.90).abs() < f64::EPSILON);
        assert!((pct(-2, Sex::Male) - 1.1).abs() < f64::EPSILON);
        assert!((pct(18, Sex::Male) - 30.1).abs() < f64::EPSILON);
        assert!((pct(17, Sex::Male) - 29.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_percentage_entry() {
        let sparse = PercentTable {
            floor_score: -2,
            ceiling_score: 5,
            entries: &[(0, 1.2)],
        };
        assert_eq!(sparse.percentage(0), Some(1.2));
        assert_eq!(sparse.percentage(3), None);
        assert_eq!(sparse.percentage(9), Some(CEILING_RISK_PERCENT));
    }

    #[test]
    fn test_risk_classes() {
        assert_eq!(classify_risk(4.9, Sex::Female), CardioRiskClass::Low);
        assert_eq!(classify_risk(5.0, Sex::Female), CardioRiskClass::Intermediate);
        assert_eq!(classify_risk(9.9, Sex::Female), CardioRiskClass::Intermediate);
        assert_eq!(classify_risk(10.0, Sex::Female), CardioRiskClass::High);
        assert_eq!(classify_risk(19.9, Sex::Male), CardioRiskClass::Intermediate);
        assert_eq!(classify_risk(20.0, Sex::Male), CardioRiskClass::High);
        assert_eq!(classify_risk(0.9, Sex::Male), CardioRiskClass::Low);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Clamp".parse::<LookupMissPolicy>().expect("Should parse"), LookupMissPolicy::Clamp);
        assert_eq!("zero".parse::<LookupMissPolicy>().expect("Should parse"), LookupMissPolicy::ZeroPoints);
        assert!("ignore".parse::<LookupMissPolicy>().is_err());
    }

    #[test]
    fn test_idempotent() {
        let inputs = male_smoker();
        let a = assess(&inputs, LookupMissPolicy::Reject).expect("Should assess");
        let b = assess(&inputs, LookupMissPolicy::Reject).expect("Should assess");
        assert_eq!(a, b);
        assert_eq!(a.percentage.to_bits(), b.percentage.to_bits());
    }
}
