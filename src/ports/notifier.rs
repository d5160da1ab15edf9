//! Feedback port: Trait for delivering user suggestions.

use crate::domain::Feedback;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    /// Relay credentials are missing from configuration.
    #[error("feedback relay not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("invalid feedback: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("feedback delivery failed: {0}")]
    Failed(String),
}

/// Delivers a validated feedback record somewhere a human will read it.
pub trait FeedbackNotifier: Send + Sync {
    /// # Errors
    /// Returns `FeedbackError::NotConfigured` before any I/O if the notifier
    /// lacks credentials, `FeedbackError::Failed` on delivery failure.
    fn send(&self, feedback: &Feedback) -> Result<(), FeedbackError>;
}

impl<T: FeedbackNotifier + ?Sized> FeedbackNotifier for std::sync::Arc<T> {
    fn send(&self, feedback: &Feedback) -> Result<(), FeedbackError> {
        (**self).send(feedback)
    }
}
