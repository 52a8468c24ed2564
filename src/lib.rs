//! # CloudPayments Rust Client
//!
//! A **type-safe, validating** async client for the CloudPayments payment gateway.
//!
//! ## Features
//!
//! - 💳 **Card payments**: Charge or authorize with a card cryptogram packet
//! - 🔁 **Token payments**: Charge or authorize with a token issued by an earlier payment
//! - 👛 **Wallet tokens**: Pay with base64-wrapped wallet tokens (e.g. Yandex Pay), decoded before sending
//! - ✅ **Validation**: Amount, currency, locale and required fields are checked before anything is sent
//! - 🔒 **Type safety**: Typed requests and responses, one error enum covering the whole pipeline
//! - 📝 **Logging**: Every failure is reported once through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_cloudpayments::CloudPaymentsClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudPaymentsClient::new("pk_0123456789", "api_secret")?;
//!
//!     let response = client
//!         .pay_token(
//!             &json!({
//!                 "Amount": 100.50,
//!                 "Currency": "RUB",
//!                 "AccountId": "user_x",
//!                 "Token": "success_1111a3e0-2428-48fb-a530-12815d90d0e8",
//!             }),
//!             Some("charge"),
//!         )
//!         .await?;
//!
//!     println!("Success: {}, message: {:?}", response.success, response.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Request, response and configuration types, gateway constants
//! - **`validator`**: Rule-table validation of caller data and gateway responses
//! - **`client`**: The payment client and its three payment flows
//! - **`transport`**: The network seam and its pooled `reqwest` implementation
//! - **`auth`**: HTTP Basic credentials
//! - **`token`**: Encoded wallet token handling
//! - **`error`**: Error taxonomy
//!
//! ## Error Handling
//!
//! Every operation returns [`Result`]. Validation failures
//! ([`CloudPaymentsError::PaymentType`], [`CloudPaymentsError::RequestValidation`])
//! are raised before any request is sent; [`CloudPaymentsError::Interaction`]
//! covers transport failures and [`CloudPaymentsError::ResponseValidation`]
//! a gateway answer of unexpected shape. Nothing is retried.

pub mod auth;
pub mod client;
pub mod error;
pub mod token;
pub mod transport;
pub mod types;
pub mod validator;

// Re-exports for convenience
pub use auth::BasicAuth;
pub use client::CloudPaymentsClient;
pub use error::{CloudPaymentsError, Result, Rule, Violation, Violations};
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::*;
pub use validator::CloudPaymentsValidator;

/// Current version of the client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_constant() {
        // VERSION is a const string, so it's never empty
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(constants::BASE_URL, "https://api.cloudpayments.ru");
        assert_eq!(constants::CARD_PAY_URL, "/payments/cards/");
        assert_eq!(constants::TOKEN_PAY_URL, "/payments/tokens/");
        assert_eq!(constants::PAYMENT_TYPES, &["auth", "charge"]);
        assert_eq!(constants::REQUEST_TIMEOUT.as_secs(), 300);
    }

    #[test]
    fn test_validated_request_serializes_with_wire_names() {
        let validator = CloudPaymentsValidator::default();
        let request = validator
            .token_request(&json!({
                "Amount": 10,
                "Token": "tok",
                "InvoiceId": "1234567",
                "JsonData": { "source": "web" }
            }))
            .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "Amount": 10.0,
                "Currency": "RUB",
                "InvoiceId": "1234567",
                "JsonData": { "source": "web" },
                "Token": "tok"
            })
        );
    }
}
