//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases: filling in a risk form, submitting it for prediction,
//! presenting the result, and sending feedback.

mod feedback;
mod form;
mod notice;
mod prediction;
pub mod presenter;

pub use feedback::{FeedbackField, FeedbackForm, FeedbackService};
pub use form::{FormController, FormError};
pub use notice::{Notice, NoticeKind};
pub use prediction::PredictionService;
pub use presenter::{present, probability_label, ResultPresentation, DISCLAIMER};

#[cfg(test)]
pub(crate) use prediction::fakes;
