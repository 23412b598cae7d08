//! Score observer port: Trait for tracing intermediate scoring state.
//!
//! Observers sit outside the pure scoring contract. The application layer
//! feeds them snapshots after scoring succeeds.

use crate::domain::{ScoreStep, Sex};

/// Receives per-factor snapshots of a cardiovascular score.
pub trait ScoreObserver: Send + Sync {
    /// Called once per factor, in scoring order.
    fn on_step(&self, sex: Sex, step: &ScoreStep);

    /// Called after the last factor with the final total.
    fn on_total(&self, _sex: Sex, _score: i32) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScoreObserver for NoopObserver {
    fn on_step(&self, _sex: Sex, _step: &ScoreStep) {}
}
