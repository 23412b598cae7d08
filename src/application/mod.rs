//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the two calculator use cases.

mod cardio;
mod renal;

pub use cardio::CardioService;
pub use renal::RenalService;
