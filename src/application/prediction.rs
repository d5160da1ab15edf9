//! Prediction service: validates a request and runs it against the backend.

use std::sync::Arc;

use crate::domain::{AssessmentRequest, RiskAssessment};
use crate::ports::{BackendHealth, PredictionBackend, PredictionFailed};
use crate::PredictCareError;

use super::form::{FormController, FormError};

/// Service for running risk predictions.
pub struct PredictionService<B: PredictionBackend + ?Sized> {
    backend: Arc<B>,
}

impl<B: PredictionBackend + ?Sized> Clone for PredictionService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: PredictionBackend + ?Sized> PredictionService<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Validate and submit one request.
    ///
    /// The failure cause is logged here; callers only ever see the uniform
    /// `PredictCareError::Prediction`.
    ///
    /// # Errors
    /// Returns `PredictCareError::Validation` for out-of-range fields and
    /// `PredictCareError::Prediction` for any backend failure.
    pub fn assess(&self, request: &AssessmentRequest) -> crate::Result<RiskAssessment> {
        let domain = request.domain();
        request
            .validate()
            .map_err(|errors| PredictCareError::Validation(errors.join("; ")))?;

        tracing::info!(%domain, "Running risk prediction");
        match self.backend.predict(request) {
            Ok(assessment) => {
                tracing::info!(%domain, tier = %assessment.tier, "Prediction complete");
                Ok(assessment)
            }
            Err(failure) => {
                tracing::warn!(%domain, cause = %failure.cause(), "Prediction failed");
                Err(failure.into())
            }
        }
    }

    /// Run a form's submission synchronously: gate, send, resolve.
    ///
    /// # Errors
    /// Returns `FormError` if the form refuses to submit. Backend failures are
    /// recorded on the form, not returned.
    pub fn submit(&self, form: &mut FormController) -> Result<(), FormError> {
        let snapshot = form.begin_submit()?;
        form.complete(self.assess(&snapshot));
        Ok(())
    }

    /// # Errors
    /// Returns `PredictionFailed` if the service is unreachable or unhealthy.
    pub fn health(&self) -> Result<BackendHealth, PredictionFailed> {
        let result = self.backend.health();
        match &result {
            Ok(health) => tracing::info!(status = %health.status, "Backend health"),
            Err(failure) => tracing::warn!(cause = %failure.cause(), "Backend health check failed"),
        }
        result
    }
}
