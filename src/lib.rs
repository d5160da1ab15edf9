//! # PredictCare
//!
//! Health risk assessment client for three risk models: chronic heart
//! disease, stroke and diabetes.
//!
//! This crate provides:
//! - Typed, range-checked parameter forms for each risk model
//! - An HTTP client for the external inference service
//! - Tier classification and result copy for the returned probability
//! - A feedback channel through an email relay
//! - Terminal UI and command-line front-ends
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (domains, tiers, parameter records)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (reqwest clients, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Layered settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{AssessmentRequest, Domain, RiskAssessment, RiskTier};

/// Result type for PredictCare operations
pub type Result<T> = std::result::Result<T, PredictCareError>;

/// Main error type for PredictCare
#[derive(Debug, thiserror::Error)]
pub enum PredictCareError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Prediction(#[from] ports::PredictionFailed),

    #[error(transparent)]
    Feedback(#[from] ports::FeedbackError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<Box<figment::Error>> for PredictCareError {
    fn from(err: Box<figment::Error>) -> Self {
        Self::Config(err.to_string())
    }
}
