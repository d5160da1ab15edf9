//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the inference service
//! - `email_relay`: reqwest client for the feedback email relay
//! - `sanitize`: health-data and secret filtering for logs

pub mod email_relay;
pub mod http;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod stub_server;

pub use email_relay::EmailRelayNotifier;
pub use http::HttpPredictionClient;
