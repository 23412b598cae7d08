//! Cardio service: Orchestrates cardiovascular risk scoring.
//!
//! This service coordinates:
//! - Per-factor scoring against the sex-specific tables
//! - Observer notification with intermediate snapshots
//! - Percentage conversion and risk banding

use std::sync::Arc;

use crate::adapters::form::{parse_cardio_form, FormFields};
use crate::config::CalculatorConfig;
use crate::domain::cardio::{compute_score, CardioAssessment};
use crate::domain::{CardioInputs, ScoringTable};
use crate::ports::ScoreObserver;
use crate::Result;

/// Service for the cardiovascular risk calculator.
pub struct CardioService<O>
where
    O: ScoreObserver,
{
    observer: Arc<O>,
    config: CalculatorConfig,
}

impl<O> CardioService<O>
where
    O: ScoreObserver,
{
    /// Create a new cardio service.
    pub fn new(observer: Arc<O>, config: CalculatorConfig) -> Self {
        Self { observer, config }
    }

    /// Score and classify already parsed inputs.
    ///
    /// # Errors
    /// Returns `TableLookupMiss` or `ScoreNotInTable` when a table has no
    /// entry for the inputs under the configured policy.
    pub fn assess(&self, inputs: &CardioInputs) -> Result<CardioAssessment> {
        let table = ScoringTable::for_sex(inputs.sex);

        tracing::debug!(
            sex = %inputs.sex,
            policy = ?self.config.lookup_miss,
            "Scoring cardiovascular risk"
        );
        let breakdown = compute_score(inputs, table, self.config.lookup_miss).map_err(|e| {
            tracing::warn!("Cardiovascular scoring failed: {}", e);
            e
        })?;

        for step in &breakdown.steps {
            self.observer.on_step(inputs.sex, step);
        }
        self.observer.on_total(inputs.sex, breakdown.total());

        let assessment = CardioAssessment::from_score(breakdown.total(), inputs.sex)?;

        tracing::info!(
            "Cardiovascular assessment complete: score={}, risk={:.2}%, class={}",
            assessment.score,
            assessment.percentage,
            assessment.classification
        );

        Ok(assessment)
    }

    /// Parse raw form fields, then assess.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the form does not parse or validate, or
    /// any error from [`Self::assess`].
    pub fn assess_form(&self, form: &FormFields) -> Result<CardioAssessment> {
        let inputs = parse_cardio_form(form)?;
        self.assess(&inputs)
    }
}
