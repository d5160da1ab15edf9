//! HTTP prediction client.
//!
//! Talks to the external inference service:
//! - `POST {base_url}/predict/{chd|stroke|diabetes}` with the parameter record
//!   as a JSON body, answered by `{"probability": <0..1>, "risk": "..."}`
//! - `GET {base_url}/health`
//!
//! Uses the blocking reqwest client; callers run it off the UI thread.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::{AssessmentRequest, RiskAssessment};
use crate::ports::{BackendHealth, PredictionBackend, PredictionFailed};
use crate::PredictCareError;

/// Body returned by the prediction endpoints.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    probability: f64,

    /// Server-side tier label. Informational; the tier is derived locally.
    #[serde(default)]
    risk: Option<String>,
}

/// Prediction backend over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpPredictionClient {
    /// Create a client for the service rooted at `base_url`.
    ///
    /// `timeout` of `None` waits indefinitely for a response.
    ///
    /// # Errors
    /// Returns `PredictCareError::Config` if the base URL is empty or the
    /// underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> crate::Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PredictCareError::Config(
                "backend.base_url must not be empty".to_string(),
            ));
        }

        // The blocking client defaults to a 30s timeout; `None` lifts it.
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictCareError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the body text of a success response.
    fn fetch(&self, request: reqwest::blocking::RequestBuilder) -> Result<String, PredictionFailed> {
        let response = request
            .send()
            .map_err(|e| PredictionFailed::transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionFailed::status(status.as_u16()));
        }

        response
            .text()
            .map_err(|e| PredictionFailed::transport(e.without_url().to_string()))
    }
}

impl PredictionBackend for HttpPredictionClient {
    fn predict(&self, request: &AssessmentRequest) -> Result<RiskAssessment, PredictionFailed> {
        let domain = request.domain();
        let url = self.endpoint(&format!("predict/{}", domain.slug()));
        tracing::debug!(%domain, url = %url, "Submitting prediction request");

        let body = self.fetch(self.client.post(&url).json(request))?;
        let parsed: PredictionResponse =
            serde_json::from_str(&body).map_err(|e| PredictionFailed::malformed(e.to_string()))?;

        let assessment = RiskAssessment::from_probability(domain, parsed.probability)
            .map_err(PredictionFailed::malformed)?;

        if let Some(server_risk) = parsed.risk.as_deref() {
            if !server_risk.eq_ignore_ascii_case(assessment.tier.label()) {
                tracing::debug!(
                    %domain,
                    server_risk,
                    local_tier = %assessment.tier,
                    "Server risk label disagrees with local tier; using local tier"
                );
            }
        }

        Ok(assessment)
    }

    fn health(&self) -> Result<BackendHealth, PredictionFailed> {
        let body = self.fetch(self.client.get(self.endpoint("health")))?;
        serde_json::from_str(&body).map_err(|e| PredictionFailed::malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stub_server;
    use crate::domain::{Domain, FieldValue, RiskTier};
    use crate::ports::FailureCause;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn client(base: &str) -> HttpPredictionClient {
        HttpPredictionClient::new(base, Some(Duration::from_secs(5))).expect("client")
    }

    #[test]
    fn test_predict_posts_record_and_classifies() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&seen);
        let router = Router::new().route(
            "/api/predict/chd",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&captured);
                async move {
                    *captured.lock().expect("lock") = Some(body);
                    Json(json!({"probability": 0.75, "risk": "High"}))
                }
            }),
        );
        let base = format!("{}/api/", stub_server::serve(router));

        let mut request = AssessmentRequest::defaults(Domain::Chd);
        request
            .assign("sysBP", FieldValue::Number(150.0))
            .expect("assign");

        let assessment = client(&base).predict(&request).expect("prediction");
        assert_eq!(assessment.domain, Domain::Chd);
        assert_eq!(assessment.tier, RiskTier::High);
        assert!((assessment.probability - 0.75).abs() < f64::EPSILON);

        let body = seen.lock().expect("lock").clone().expect("request body");
        assert_eq!(body["sysBP"], json!(150.0));
        assert_eq!(body["age"], json!(45));
        assert_eq!(body.as_object().map(|o| o.len()), Some(15));
    }

    #[test]
    fn test_server_risk_label_is_ignored() {
        let router = Router::new().route(
            "/predict/stroke",
            post(|| async { Json(json!({"probability": 0.05, "risk": "High"})) }),
        );
        let base = stub_server::serve(router);

        let assessment = client(&base)
            .predict(&AssessmentRequest::defaults(Domain::Stroke))
            .expect("prediction");
        assert_eq!(assessment.tier, RiskTier::Low);
    }

    #[test]
    fn test_non_success_status_fails_uniformly() {
        let router = Router::new().route(
            "/predict/diabetes",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model exploded") }),
        );
        let base = stub_server::serve(router);

        let err = client(&base)
            .predict(&AssessmentRequest::defaults(Domain::Diabetes))
            .expect_err("should fail");
        assert_eq!(err.to_string(), "prediction failed");
        assert_eq!(err.cause(), &FailureCause::Status(500));
    }

    #[test]
    fn test_malformed_bodies_fail() {
        let router = Router::new()
            .route("/predict/chd", post(|| async { "not json" }))
            .route(
                "/predict/stroke",
                post(|| async { Json(json!({"risk": "Low"})) }),
            )
            .route(
                "/predict/diabetes",
                post(|| async { Json(json!({"probability": 1.7})) }),
            );
        let base = stub_server::serve(router);
        let client = client(&base);

        for domain in Domain::ALL {
            let err = client
                .predict(&AssessmentRequest::defaults(domain))
                .expect_err("should fail");
            assert!(
                matches!(err.cause(), FailureCause::Malformed(_)),
                "{domain}: {:?}",
                err.cause()
            );
        }
    }

    #[test]
    fn test_unreachable_backend_is_transport_failure() {
        let err = client("http://127.0.0.1:1")
            .predict(&AssessmentRequest::defaults(Domain::Chd))
            .expect_err("should fail");
        assert!(matches!(err.cause(), FailureCause::Transport(_)));
    }

    #[test]
    fn test_health_probe() {
        let router = Router::new().route(
            "/api/health",
            get(|| async {
                Json(json!({"status": "healthy", "message": "PredictCare API is running"}))
            }),
        );
        let base = format!("{}/api", stub_server::serve(router));

        let health = client(&base).health().expect("health");
        assert_eq!(health.status, "healthy");
        assert_eq!(health.message.as_deref(), Some("PredictCare API is running"));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(matches!(
            HttpPredictionClient::new("  ", None),
            Err(PredictCareError::Config(_))
        ));
    }
}
