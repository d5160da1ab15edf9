//! Email relay feedback notifier.
//!
//! Posts suggestions to a hosted email relay (EmailJS-compatible REST API):
//!
//! ```json
//! {"service_id": "...", "template_id": "...", "user_id": "...",
//!  "template_params": {"name": "...", "subject": "...", "suggestion": "..."}}
//! ```
//!
//! Credentials come from configuration only.

use std::time::Duration;

use serde::Serialize;

use crate::domain::Feedback;
use crate::ports::{FeedbackError, FeedbackNotifier};

/// Default endpoint of the hosted relay.
pub const DEFAULT_RELAY_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

const RELAY_TIMEOUT_SECS: u64 = 15;

#[derive(Serialize)]
struct RelayPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a Feedback,
}

/// Feedback notifier backed by the email relay.
pub struct EmailRelayNotifier {
    client: reqwest::blocking::Client,
    relay_url: String,
    service_id: Option<String>,
    template_id: Option<String>,
    public_key: Option<String>,
}

impl EmailRelayNotifier {
    /// Blank credentials are treated as missing.
    #[must_use]
    pub fn new(
        relay_url: impl Into<String>,
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(RELAY_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(?err, "relay client build failed; using default client");
                reqwest::blocking::Client::new()
            });

        Self {
            client,
            relay_url: relay_url.into(),
            service_id: service_id.and_then(normalize),
            template_id: template_id.and_then(normalize),
            public_key: public_key.and_then(normalize),
        }
    }

    /// Whether every credential is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    fn credentials(&self) -> Result<(&str, &str, &str), FeedbackError> {
        let service_id = self
            .service_id
            .as_deref()
            .ok_or(FeedbackError::NotConfigured("feedback.service_id"))?;
        let template_id = self
            .template_id
            .as_deref()
            .ok_or(FeedbackError::NotConfigured("feedback.template_id"))?;
        let public_key = self
            .public_key
            .as_deref()
            .ok_or(FeedbackError::NotConfigured("feedback.public_key"))?;
        Ok((service_id, template_id, public_key))
    }
}

impl std::fmt::Debug for EmailRelayNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailRelayNotifier")
            .field("relay_url", &self.relay_url)
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

impl FeedbackNotifier for EmailRelayNotifier {
    fn send(&self, feedback: &Feedback) -> Result<(), FeedbackError> {
        let (service_id, template_id, user_id) = self.credentials()?;

        let payload = RelayPayload {
            service_id,
            template_id,
            user_id,
            template_params: feedback,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&payload)
            .send()
            .map_err(|e| FeedbackError::Failed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedbackError::Failed(format!("relay returned HTTP {status}")));
        }

        tracing::info!("Feedback relayed");
        Ok(())
    }
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stub_server;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn feedback() -> Feedback {
        Feedback {
            name: "Ada".into(),
            subject: "Stroke form".into(),
            suggestion: "Add a glucose unit toggle".into(),
        }
    }

    fn notifier(url: &str) -> EmailRelayNotifier {
        EmailRelayNotifier::new(
            url,
            Some("service_x".into()),
            Some("template_y".into()),
            Some("pk_z".into()),
        )
    }

    #[test]
    fn test_missing_credentials_skip_network() {
        // Unroutable URL: reaching the network would fail differently.
        let notifier = EmailRelayNotifier::new(
            "http://127.0.0.1:1/send",
            Some("service_x".into()),
            Some("   ".into()),
            None,
        );
        assert!(!notifier.is_configured());
        assert_eq!(
            notifier.send(&feedback()),
            Err(FeedbackError::NotConfigured("feedback.template_id"))
        );
    }

    #[test]
    fn test_relay_payload_shape() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&seen);
        let router = Router::new().route(
            "/send",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&captured);
                async move {
                    *captured.lock().expect("lock") = Some(body);
                    "OK"
                }
            }),
        );
        let base = stub_server::serve(router);

        notifier(&format!("{base}/send"))
            .send(&feedback())
            .expect("relay");

        let body = seen.lock().expect("lock").clone().expect("payload");
        assert_eq!(
            body,
            json!({
                "service_id": "service_x",
                "template_id": "template_y",
                "user_id": "pk_z",
                "template_params": {
                    "name": "Ada",
                    "subject": "Stroke form",
                    "suggestion": "Add a glucose unit toggle"
                }
            })
        );
    }

    #[test]
    fn test_relay_rejection_is_failure() {
        let router = Router::new().route(
            "/send",
            post(|| async { (StatusCode::FORBIDDEN, "bad key") }),
        );
        let base = stub_server::serve(router);

        let err = notifier(&format!("{base}/send"))
            .send(&feedback())
            .expect_err("should fail");
        assert!(matches!(err, FeedbackError::Failed(_)));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let rendered = format!("{:?}", notifier(DEFAULT_RELAY_URL));
        assert!(!rendered.contains("pk_z"));
        assert!(rendered.contains("configured: true"));
    }
}
