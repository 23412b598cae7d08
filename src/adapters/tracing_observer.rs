//! `ScoreObserver` backed by `tracing` events.
//!
//! Only factor names and points are emitted; raw patient values never
//! reach the log.

use crate::domain::{ScoreStep, Sex};
use crate::ports::ScoreObserver;

/// Emits each scoring step as a `debug!` event under the
/// `riskcalc::score` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScoreObserver for TracingObserver {
    fn on_step(&self, sex: Sex, step: &ScoreStep) {
        tracing::debug!(
            target: "riskcalc::score",
            %sex,
            factor = %step.factor,
            points = step.points,
            subtotal = step.subtotal,
            "factor scored"
        );
    }

    fn on_total(&self, sex: Sex, score: i32) {
        tracing::debug!(target: "riskcalc::score", %sex, score, "score complete");
    }
}
