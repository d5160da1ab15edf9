//! Prediction port: Trait for the external inference service.
//!
//! The application never talks HTTP directly; it hands a typed request to a
//! `PredictionBackend` and gets either a classified assessment or one uniform
//! failure back.

use crate::domain::{AssessmentRequest, RiskAssessment};

/// Internal reason a prediction failed. Kept for logging only; callers
/// present every variant identically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureCause {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("inference service returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Uniform prediction failure.
///
/// `Display` never varies with the cause; use [`PredictionFailed::cause`] or
/// the error source chain for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prediction failed")]
pub struct PredictionFailed {
    #[source]
    cause: FailureCause,
}

impl PredictionFailed {
    #[must_use]
    pub fn new(cause: FailureCause) -> Self {
        Self { cause }
    }

    #[must_use]
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(FailureCause::Transport(detail.into()))
    }

    #[must_use]
    pub fn status(code: u16) -> Self {
        Self::new(FailureCause::Status(code))
    }

    #[must_use]
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(FailureCause::Malformed(detail.into()))
    }

    #[must_use]
    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }
}

/// Liveness report from the inference service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct BackendHealth {
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,
}

/// Trait for risk inference.
///
/// Implementations block the calling thread until the outcome is known; the
/// TUI calls them from a worker thread.
pub trait PredictionBackend: Send + Sync {
    /// Submit one request and classify the returned probability.
    ///
    /// # Errors
    /// Returns `PredictionFailed` on transport failure, a non-success status
    /// or a malformed body. Never returns a partial result.
    fn predict(&self, request: &AssessmentRequest) -> Result<RiskAssessment, PredictionFailed>;

    /// Probe the service's health endpoint.
    ///
    /// # Errors
    /// Same taxonomy as [`PredictionBackend::predict`].
    fn health(&self) -> Result<BackendHealth, PredictionFailed>;
}

impl<T: PredictionBackend + ?Sized> PredictionBackend for std::sync::Arc<T> {
    fn predict(&self, request: &AssessmentRequest) -> Result<RiskAssessment, PredictionFailed> {
        (**self).predict(request)
    }

    fn health(&self) -> Result<BackendHealth, PredictionFailed> {
        (**self).health()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_is_uniform() {
        let failures = [
            PredictionFailed::transport("connection refused"),
            PredictionFailed::status(500),
            PredictionFailed::malformed("missing field `probability`"),
        ];
        for failure in &failures {
            assert_eq!(failure.to_string(), "prediction failed");
            assert!(failure.source().is_some());
        }
        assert_eq!(failures[1].cause(), &FailureCause::Status(500));
    }
}
