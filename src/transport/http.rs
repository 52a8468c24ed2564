//! HTTP transport over a pooled `reqwest` client

use super::{Transport, TransportError};
use crate::auth::BasicAuth;
use crate::types::ClientConfig;
use crate::{CloudPaymentsError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

/// Pooled HTTP transport
///
/// The pool lives until [`Transport::close`] is called; afterwards every send
/// fails with [`TransportError::Closed`].
pub struct HttpTransport {
    client: RwLock<Option<Client>>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport with the timeouts from `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| CloudPaymentsError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: RwLock::new(Some(client)),
        })
    }

    /// Whether the pool has been released
    pub fn is_closed(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn client(&self) -> Option<Client> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        auth: &BasicAuth,
    ) -> std::result::Result<Value, TransportError> {
        let client = self.client().ok_or(TransportError::Closed)?;

        tracing::debug!("Sending request to: {}", url);

        let response = client
            .post(url)
            .basic_auth(auth.login(), Some(auth.password()))
            .json(body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: response_body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }

    fn close(&self) {
        let released = self
            .client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if released.is_some() {
            tracing::debug!("HTTP transport pool released");
        }
    }
}
