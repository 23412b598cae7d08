//! Ports layer: Trait definitions for pluggable collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its optional hooks.

mod observer;

pub use observer::{NoopObserver, ScoreObserver};
