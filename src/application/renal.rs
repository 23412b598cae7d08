//! Renal service: eGFR estimation and staging use case.

use crate::adapters::form::{parse_renal_form, FormFields};
use crate::domain::{RenalAssessment, RenalInputs};
use crate::Result;

/// Service for the eGFR calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenalService;

impl RenalService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Estimate and stage eGFR for already parsed inputs.
    #[must_use]
    pub fn assess(&self, inputs: &RenalInputs) -> RenalAssessment {
        let assessment = RenalAssessment::assess(inputs);

        tracing::info!(
            "eGFR assessment complete: egfr={:.1}, stage={}",
            assessment.egfr,
            assessment.stage
        );

        assessment
    }

    /// Parse raw form fields, then assess.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the form does not parse or validate.
    pub fn assess_form(&self, form: &FormFields) -> Result<RenalAssessment> {
        let inputs = parse_renal_form(form)?;
        tracing::debug!(sex = %inputs.sex, "Parsed eGFR form");
        Ok(self.assess(&inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ethnicity, RenalStage, Sex};

    #[test]
    fn test_assess() {
        let service = RenalService::new();
        let assessment = service.assess(&RenalInputs {
            age: 0,
            sex: Sex::Male,
            ethnicity: Ethnicity::Other,
            creatinine: 0.9,
        });
        assert!((assessment.egfr - 141.0).abs() < 1e-9);
        assert_eq!(assessment.stage, RenalStage::G1);
    }

    #[test]
    fn test_assess_form() {
        let form = FormFields::from_pairs(["idade=50", "sexo=masculino", "etnia=preto", "creatinina=1.2"])
            .expect("Should split");
        let assessment = RenalService::new().assess_form(&form).expect("Should assess");
        assert_eq!(assessment.stage, RenalStage::G2);
        assert_eq!(assessment.color, "#8BC34A");
    }

    #[test]
    fn test_dialysis_range_creatinine_stages_g5() {
        let form = FormFields::from_pairs(["idade=70", "sexo=masculino", "creatinina=22"])
            .expect("Should split");
        let assessment = RenalService::new().assess_form(&form).expect("Should assess");
        assert_eq!(assessment.stage, RenalStage::G5);
    }
}
