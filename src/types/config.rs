//! Client configuration

use super::constants::{BASE_URL, DEFAULT_SERVICE, REQUEST_TIMEOUT};
use std::time::Duration;

/// Gateway client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root the endpoint paths are appended to
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Service tag attached to errors and log events
    pub service: String,
}

impl ClientConfig {
    /// Create a config for the given API root with default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
            connect_timeout: REQUEST_TIMEOUT,
            service: DEFAULT_SERVICE.to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.base_url.is_empty() {
            return Err(crate::CloudPaymentsError::config("Base URL cannot be empty"));
        }

        let url = url::Url::parse(&self.base_url).map_err(|e| {
            crate::CloudPaymentsError::config(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(crate::CloudPaymentsError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(crate::CloudPaymentsError::config(
                "Timeouts must be greater than zero",
            ));
        }

        if self.service.is_empty() {
            return Err(crate::CloudPaymentsError::config("Service tag cannot be empty"));
        }

        Ok(())
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the whole-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Set the service tag
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Join the API root, an endpoint path and a trailing segment
    pub fn endpoint_url(&self, path: &str, segment: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), path, segment)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}
