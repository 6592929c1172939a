//! # Insights Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Configuration      InvalidConfig     bad base URL / path / timeout     │
//! │  Transport          RequestFailed     connect, TLS, timeout             │
//! │  Proxy              ServiceError      non-2xx with the proxy's message  │
//! │  Protocol           MalformedResponse 2xx body without `text`           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these touch the store; the caller shows the message and lets the
//! user retry.

use thiserror::Error;

pub type InsightsResult<T> = Result<T, InsightsError>;

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("Invalid insights configuration: {0}")]
    InvalidConfig(String),

    #[error("Insights request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The proxy answered with a non-success status.
    #[error("Insights service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Malformed insights response: {0}")]
    MalformedResponse(String),
}

impl InsightsError {
    /// Message suitable for showing next to the insights panel.
    pub fn user_message(&self) -> String {
        match self {
            InsightsError::ServiceError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<url::ParseError> for InsightsError {
    fn from(err: url::ParseError) -> Self {
        InsightsError::InvalidConfig(err.to_string())
    }
}
