//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (inference service, feedback
//! relay).

mod notifier;
mod prediction;

pub use notifier::{FeedbackError, FeedbackNotifier};
pub use prediction::{BackendHealth, FailureCause, PredictionBackend, PredictionFailed};
