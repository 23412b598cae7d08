//! Adapters layer: Concrete implementations of ports and input boundaries.
//!
//! - `tracing_observer`: score snapshots as `tracing` events
//! - `form`: raw form fields to typed calculator inputs

pub mod form;
pub mod tracing_observer;

pub use form::{parse_cardio_form, parse_renal_form, FormFields};
pub use tracing_observer::TracingObserver;
