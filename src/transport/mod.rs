//! Transport seam between the payment client and the network
//!
//! The client only needs one capability from the network: POST a JSON body
//! with credentials and get a JSON body back. [`Transport`] captures that, so
//! the pooled [`HttpTransport`] can be swapped for a recording stub in tests.
//!
//! # Architecture
//!
//! - [`Transport`] - async send capability plus pool release
//! - [`TransportError`] - status, timeout, connection and body failures
//! - [`HttpTransport`] - `reqwest` implementation with connection pooling

use crate::auth::BasicAuth;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod http;

pub use http::HttpTransport;

/// Failure talking to the gateway
#[derive(Error, Debug)]
pub enum TransportError {
    /// Gateway answered with a non-success status
    #[error("gateway answered with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Request exceeded its timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection could not be established or broke mid-request
    #[error("connection failed: {0}")]
    Connection(String),

    /// Response body is not valid JSON
    #[error("invalid response body: {0}")]
    Body(String),

    /// Transport pool was already released
    #[error("transport is closed")]
    Closed,
}

impl TransportError {
    /// HTTP status, when the gateway answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::Body(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            Self::Connection(error.to_string())
        }
    }
}

/// Single-attempt JSON POST capability
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with `auth` and return the decoded JSON response
    ///
    /// Non-success statuses are errors. Implementations must not retry.
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        auth: &BasicAuth,
    ) -> std::result::Result<Value, TransportError>;

    /// Release pooled connections
    fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_status() {
        let error = TransportError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(error.status(), Some(502));
        assert_eq!(
            error.to_string(),
            "gateway answered with status 502: Bad Gateway"
        );
        assert_eq!(TransportError::Closed.status(), None);
    }
}
