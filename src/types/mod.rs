//! Core types for the CloudPayments client
//!
//! This module defines the request and response structures exchanged with the
//! gateway, the client configuration, and the constants describing the
//! gateway's endpoints and accepted value domains.
//!
//! # Architecture
//!
//! - [`constants`] - Endpoints, timeouts and enumerated value domains
//! - [`config`] - Client configuration
//! - [`payment`] - Card and token payment requests
//! - [`response`] - Gateway response
//!
//! Request values are normally produced by the
//! [`validator`](crate::validator) from caller-supplied JSON, which guarantees
//! their invariants (amount at least 0.01, known currency and locale, required
//! fields present).
//!
//! # Examples
//!
//! ```
//! use rust_cloudpayments::types::{ClientConfig, PaymentType};
//! use std::time::Duration;
//!
//! let config = ClientConfig::default().with_timeout(Duration::from_secs(30));
//! assert_eq!(
//!     config.endpoint_url("/payments/tokens/", PaymentType::Auth.as_str()),
//!     "https://api.cloudpayments.ru/payments/tokens/auth"
//! );
//! ```

pub mod config;
pub mod constants;
pub mod payment;
pub mod response;

// Re-export commonly used types
pub use config::ClientConfig;
pub use payment::{
    CardPaymentRequest, PayerData, PaymentBase, PaymentRequest, PaymentType, TokenPaymentRequest,
};
pub use response::PaymentResponse;
