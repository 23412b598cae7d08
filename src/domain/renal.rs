//! eGFR estimation (CKD-EPI 2009) and chronic kidney disease staging.

use serde::{Deserialize, Serialize};

use super::patient::{Ethnicity, RenalInputs, Sex};

/// Estimate the glomerular filtration rate in mL/min/1.73m².
///
/// The female branch divides creatinine by 0.9 while switching exponent at
/// 0.7; that pairing is kept as deployed. Degenerate creatinine (zero or
/// negative) is not rejected here.
#[must_use]
pub fn compute_egfr(age: u32, sex: Sex, ethnicity: Ethnicity, creatinine: f64) -> f64 {
    let ratio = creatinine / 0.9;
    let age_factor = 0.993_f64.powf(f64::from(age));

    let egfr = match sex {
        Sex::Male => {
            let k = if creatinine <= 0.9 { -0.411 } else { -1.209 };
            141.0 * ratio.powf(k) * age_factor
        }
        Sex::Female => {
            let k = if creatinine <= 0.7 { -0.329 } else { -1.209 };
            141.0 * 1.018 * ratio.powf(k) * age_factor
        }
    };

    egfr * ethnicity.egfr_multiplier()
}

/// KDIGO GFR category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenalStage {
    /// Normal or high, above 90
    G1,
    /// Mildly decreased, 60 to 90
    G2,
    /// Mildly to moderately decreased, 45 to 59
    G3a,
    /// Moderately to severely decreased, 30 to 44
    G3b,
    /// Severely decreased, 15 to 29
    G4,
    /// Kidney failure, below 15
    G5,
}

impl RenalStage {
    /// Stage code as displayed ("G1" .. "G5").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::G1 => "G1",
            Self::G2 => "G2",
            Self::G3a => "G3a",
            Self::G3b => "G3b",
            Self::G4 => "G4",
            Self::G5 => "G5",
        }
    }

    #[must_use]
    pub fn diagnosis(&self) -> &'static str {
        match self {
            Self::G1 => "Normal",
            Self::G2 => "Mild reduction",
            Self::G3a => "Mild-moderate reduction",
            Self::G3b => "Mild-severe reduction",
            Self::G4 => "Severe reduction",
            Self::G5 => "Renal failure",
        }
    }

    /// Display color as a hex string.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::G1 => "#4CAF50", // Green
            Self::G2 => "#8BC34A", // Light green
            Self::G3a => "#FFEB3B", // Yellow
            Self::G3b => "#FF9800", // Orange
            Self::G4 => "#FF5722", // Deep orange
            Self::G5 => "#F44336", // Red
        }
    }
}

impl std::fmt::Display for RenalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Stage an eGFR value.
///
/// Lower bounds are inclusive and G1 starts strictly above 90, so 90.0 is
/// G2 and fractional values between the integer bands still land in the
/// band below. NaN falls through to G5.
#[must_use]
pub fn classify_egfr(egfr: f64) -> RenalStage {
    if egfr > 90.0 {
        RenalStage::G1
    } else if egfr >= 60.0 {
        RenalStage::G2
    } else if egfr >= 45.0 {
        RenalStage::G3a
    } else if egfr >= 30.0 {
        RenalStage::G3b
    } else if egfr >= 15.0 {
        RenalStage::G4
    } else {
        RenalStage::G5
    }
}

/// Complete eGFR result record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenalAssessment {
    /// Estimated GFR in mL/min/1.73m²
    pub egfr: f64,
    pub stage: RenalStage,
    pub diagnosis: &'static str,
    pub color: &'static str,
}

impl RenalAssessment {
    /// Compute and stage in one pass.
    #[must_use]
    pub fn assess(inputs: &RenalInputs) -> Self {
        let egfr = compute_egfr(inputs.age, inputs.sex, inputs.ethnicity, inputs.creatinine);
        Self::from_egfr(egfr)
    }

    #[must_use]
    pub fn from_egfr(egfr: f64) -> Self {
        let stage = classify_egfr(egfr);
        Self {
            egfr,
            stage,
            diagnosis: stage.diagnosis(),
            color: stage.color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_male_reference_point() {
        let egfr = compute_egfr(0, Sex::Male, Ethnicity::from_label("white"), 0.9);
        assert_close(egfr, 141.0);
    }

    #[test]
    fn test_male_high_creatinine_black() {
        let egfr = compute_egfr(50, Sex::Male, Ethnicity::Black, 1.2);
        assert_close(egfr, 81.229_548_787_326_22);
        assert_eq!(classify_egfr(egfr), RenalStage::G2);
    }

    #[test]
    fn test_female_branches_use_point_nine_divisor() {
        // Low creatinine: k = -0.329
        let low = compute_egfr(40, Sex::Female, Ethnicity::Other, 0.6);
        assert_close(low, 123.842_826_278_276_66);

        // High creatinine with multiplier: k = -1.209
        let high = compute_egfr(60, Sex::Female, Ethnicity::MixedRace, 1.0);
        assert_close(high, 96.091_379_951_360_8);
    }

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(classify_egfr(90.0001), RenalStage::G1);
        assert_eq!(classify_egfr(90.0), RenalStage::G2);
        assert_eq!(classify_egfr(89.5), RenalStage::G2);
        assert_eq!(classify_egfr(60.0), RenalStage::G2);
        assert_eq!(classify_egfr(59.5), RenalStage::G3a);
        assert_eq!(classify_egfr(45.0), RenalStage::G3a);
        assert_eq!(classify_egfr(44.0), RenalStage::G3b);
        assert_eq!(classify_egfr(30.0), RenalStage::G3b);
        assert_eq!(classify_egfr(29.9), RenalStage::G4);
        assert_eq!(classify_egfr(15.0), RenalStage::G4);
        assert_eq!(classify_egfr(14.999), RenalStage::G5);
        assert_eq!(classify_egfr(f64::NAN), RenalStage::G5);
    }

    #[test]
    fn test_assessment_record() {
        let assessment = RenalAssessment::from_egfr(120.0);
        assert_eq!(assessment.stage, RenalStage::G1);
        assert_eq!(assessment.diagnosis, "Normal");
        assert_eq!(assessment.color, "#4CAF50");

        let failure = RenalAssessment::from_egfr(10.0);
        assert_eq!(failure.stage.code(), "G5");
        assert_eq!(failure.color, "#F44336");
    }

    #[test]
    fn test_idempotent() {
        let inputs = RenalInputs {
            age: 67,
            sex: Sex::Female,
            ethnicity: Ethnicity::Black,
            creatinine: 1.4,
        };
        let a = RenalAssessment::assess(&inputs);
        let b = RenalAssessment::assess(&inputs);
        assert_eq!(a.egfr.to_bits(), b.egfr.to_bits());
        assert_eq!(a, b);
    }
}
