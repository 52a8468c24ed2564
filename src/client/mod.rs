//! CloudPayments payment client
//!
//! [`CloudPaymentsClient`] owns the merchant credentials, the transport and
//! the validator, and exposes the three payment flows the gateway offers for
//! server-side integrations:
//!
//! - [`pay_card`](CloudPaymentsClient::pay_card) - pay with a card cryptogram
//!   packet produced by the checkout script
//! - [`pay_token`](CloudPaymentsClient::pay_token) - pay with a token issued by
//!   an earlier payment
//! - [`pay_with_encoded_token`](CloudPaymentsClient::pay_with_encoded_token) -
//!   pay with a base64-wrapped wallet token (e.g. Yandex Pay)
//!
//! Each flow validates the payment type and the caller data, sends exactly one
//! authenticated request, and validates the response. Nothing is retried.
//!
//! # Examples
//!
//! ```no_run
//! use rust_cloudpayments::CloudPaymentsClient;
//! use serde_json::json;
//!
//! # async fn example() -> rust_cloudpayments::Result<()> {
//! let client = CloudPaymentsClient::new("pk_0123456789", "api_secret")?;
//!
//! let response = client
//!     .pay_card(
//!         &json!({
//!             "Amount": 100,
//!             "Currency": "RUB",
//!             "IpAddress": "123.123.123.123",
//!             "CardCryptogramPacket": "01492500008719030128SMfLeYdKp5dSQVIiO5l6ZCJiPdel4uDjdFTTz1UnXY",
//!         }),
//!         Some("auth"),
//!     )
//!     .await?;
//!
//! if response.success {
//!     println!("Transaction: {:?}", response.transaction_id());
//! }
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

use crate::auth::BasicAuth;
use crate::token;
use crate::transport::{HttpTransport, Transport};
use crate::types::{ClientConfig, PaymentRequest, PaymentResponse, PaymentType};
use crate::validator::CloudPaymentsValidator;
use crate::{CloudPaymentsError, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;


/// Client for the CloudPayments payment API
///
/// The client is `Send + Sync`; concurrent calls share the cached credentials
/// and the transport pool. The pool is released by [`close`](Self::close) or
/// when the client is dropped, whichever comes first.
pub struct CloudPaymentsClient<T: Transport = HttpTransport> {
    public_id: String,
    api_secret: String,
    /// Computed on first use
    basic_auth: OnceLock<BasicAuth>,
    config: ClientConfig,
    validator: CloudPaymentsValidator,
    transport: T,
    closed: AtomicBool,
}

impl<T: Transport> std::fmt::Debug for CloudPaymentsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudPaymentsClient")
            .field("public_id", &self.public_id)
            .field("api_secret", &"<redacted>")
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl CloudPaymentsClient<HttpTransport> {
    /// Create a client for the production gateway
    pub fn new(public_id: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(public_id, api_secret, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(
        public_id: impl Into<String>,
        api_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        // Validate configuration first
        config.validate()?;

        let transport = HttpTransport::new(&config)?;
        Self::with_transport(public_id, api_secret, config, transport)
    }
}

impl<T: Transport> CloudPaymentsClient<T> {
    /// Create a client sending through `transport`
    pub fn with_transport(
        public_id: impl Into<String>,
        api_secret: impl Into<String>,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self> {
        config.validate()?;

        let public_id = public_id.into();
        let api_secret = api_secret.into();
        if public_id.is_empty() {
            return Err(CloudPaymentsError::config("Public id cannot be empty"));
        }
        if api_secret.is_empty() {
            return Err(CloudPaymentsError::config("API secret cannot be empty"));
        }

        Ok(Self {
            public_id,
            api_secret,
            basic_auth: OnceLock::new(),
            validator: CloudPaymentsValidator::new(config.service.clone()),
            config,
            transport,
            closed: AtomicBool::new(false),
        })
    }

    /// Merchant public id
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validator used for requests and responses
    pub fn validator(&self) -> &CloudPaymentsValidator {
        &self.validator
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full URL of a payment endpoint
    pub fn endpoint_url(&self, path: &str, payment_type: PaymentType) -> String {
        self.config.endpoint_url(path, payment_type.as_str())
    }

    /// Pay with a card cryptogram packet
    ///
    /// `payment_type` is `"auth"` or `"charge"`; `None` means `"charge"`.
    pub async fn pay_card(
        &self,
        data: &Value,
        payment_type: Option<&str>,
    ) -> Result<PaymentResponse> {
        let payment_type = self.payment_type(payment_type)?;
        let request = self.validator.card_request(data)?;

        self.make_payment(payment_type, &request).await
    }

    /// Pay with a previously issued token
    ///
    /// `payment_type` is `"auth"` or `"charge"`; `None` means `"charge"`.
    pub async fn pay_token(
        &self,
        data: &Value,
        payment_type: Option<&str>,
    ) -> Result<PaymentResponse> {
        let payment_type = self.payment_type(payment_type)?;
        let request = self.validator.token_request(data)?;

        self.make_payment(payment_type, &request).await
    }

    /// Pay with a base64-wrapped token
    ///
    /// The `Token` field is decoded before sending. A token that is not valid
    /// base64 of ASCII text fails the call without a request being made.
    pub async fn pay_with_encoded_token(
        &self,
        data: &Value,
        payment_type: Option<&str>,
    ) -> Result<PaymentResponse> {
        let payment_type = self.payment_type(payment_type)?;
        let mut request = self.validator.token_request(data)?;
        request.token = token::decode_token(&request.token).map_err(|e| self.report(e))?;

        self.make_payment(payment_type, &request).await
    }

    /// Release the transport pool
    ///
    /// Safe to call more than once; the transport is closed only the first
    /// time. Dropping the client has the same effect.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!(service = %self.config.service, "Closing payment client");
            self.transport.close();
        }
    }

    /// Whether [`close`](Self::close) has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn payment_type(&self, payment_type: Option<&str>) -> Result<PaymentType> {
        self.validator
            .payment_type(payment_type.unwrap_or(PaymentType::default().as_str()))
    }

    fn basic_auth(&self) -> &BasicAuth {
        self.basic_auth
            .get_or_init(|| BasicAuth::new(&self.public_id, &self.api_secret))
    }

    async fn make_payment<R: PaymentRequest>(
        &self,
        payment_type: PaymentType,
        request: &R,
    ) -> Result<PaymentResponse> {
        if self.is_closed() {
            return Err(self.report(self.interaction_error(None, "client is closed")));
        }

        let url = self.endpoint_url(R::PATH, payment_type);
        let body = serde_json::to_value(request).map_err(|e| self.report(e.into()))?;
        tracing::debug!(service = %self.config.service, "Sending {} payment to: {}", payment_type, url);

        let response = self
            .transport
            .post_json(&url, &body, self.basic_auth())
            .await
            .map_err(|e| self.report(self.interaction_error(e.status(), e.to_string())))?;

        self.validator.payment_response(&response)
    }

    fn interaction_error(&self, status: Option<u16>, message: impl Into<String>) -> CloudPaymentsError {
        CloudPaymentsError::Interaction {
            service: self.config.service.clone(),
            status,
            message: message.into(),
        }
    }

    fn report(&self, error: CloudPaymentsError) -> CloudPaymentsError {
        tracing::error!(service = %self.config.service, kind = error.name(), "{}", error);
        error
    }
}

impl<T: Transport> Drop for CloudPaymentsClient<T> {
    fn drop(&mut self) {
        self.close();
    }
}
