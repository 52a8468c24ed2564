//! Validation of caller input and gateway output
//!
//! [`CloudPaymentsValidator`] turns untyped JSON into the typed values of
//! [`crate::types`], or into one of the validation variants of
//! [`CloudPaymentsError`]. Every failure is logged once at error level, tagged
//! with the validator's service name, before it is returned.
//!
//! Field constraints live in [`rules`] as static tables; the validator only
//! picks the table for the payload kind and deserializes the normalized
//! result.
//!
//! # Examples
//!
//! ```
//! use rust_cloudpayments::validator::CloudPaymentsValidator;
//! use serde_json::json;
//!
//! # fn example() -> rust_cloudpayments::Result<()> {
//! let validator = CloudPaymentsValidator::new("shop");
//!
//! let request = validator.token_request(&json!({
//!     "Amount": 10,
//!     "Token": "tk_020f7e9f4b5a4bf0a6b0d1ad6e0c5c1a",
//! }))?;
//! assert_eq!(request.base.currency, "RUB");
//!
//! assert!(validator.payment_type("refund").is_err());
//! # Ok(())
//! # }
//! ```

use crate::error::{Rule, Violation, Violations};
use crate::types::constants::{DEFAULT_SERVICE, PAYMENT_TYPES};
use crate::types::{CardPaymentRequest, PaymentResponse, PaymentType, TokenPaymentRequest};
use crate::{CloudPaymentsError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod rules;


use rules::{FieldRule, BASE_RULES, CARD_RULES, RESPONSE_RULES, TOKEN_RULES};

/// Validator for CloudPayments requests and responses
#[derive(Debug, Clone)]
pub struct CloudPaymentsValidator {
    /// Service tag attached to errors and log events
    service: String,
}

impl CloudPaymentsValidator {
    /// Create a validator reporting under `service`
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Service tag of this validator
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Check that `payment_type` names a gateway operation mode
    pub fn payment_type(&self, payment_type: &str) -> Result<PaymentType> {
        PaymentType::from_wire(payment_type).ok_or_else(|| {
            self.reject(CloudPaymentsError::PaymentType {
                service: self.service.clone(),
                got: payment_type.to_string(),
                allowed: PAYMENT_TYPES,
            })
        })
    }

    /// Build a card payment request from caller data
    pub fn card_request(&self, data: &Value) -> Result<CardPaymentRequest> {
        self.load(data, &[BASE_RULES, CARD_RULES], |service, violations| {
            CloudPaymentsError::RequestValidation {
                service,
                violations,
            }
        })
    }

    /// Build a token payment request from caller data
    pub fn token_request(&self, data: &Value) -> Result<TokenPaymentRequest> {
        self.load(data, &[BASE_RULES, TOKEN_RULES], |service, violations| {
            CloudPaymentsError::RequestValidation {
                service,
                violations,
            }
        })
    }

    /// Parse a gateway response body
    pub fn payment_response(&self, data: &Value) -> Result<PaymentResponse> {
        self.load(data, &[RESPONSE_RULES], |service, violations| {
            CloudPaymentsError::ResponseValidation {
                service,
                violations,
            }
        })
    }

    fn load<T: DeserializeOwned>(
        &self,
        data: &Value,
        tables: &[&[FieldRule]],
        to_error: fn(String, Violations) -> CloudPaymentsError,
    ) -> Result<T> {
        let normalized = rules::apply(data, tables)
            .map_err(|violations| self.reject(to_error(self.service.clone(), violations)))?;

        serde_json::from_value(Value::Object(normalized)).map_err(|e| {
            let violations = Violations(vec![Violation::new("_schema", Rule::Schema, e.to_string())]);
            self.reject(to_error(self.service.clone(), violations))
        })
    }

    fn reject(&self, error: CloudPaymentsError) -> CloudPaymentsError {
        tracing::error!(service = %self.service, kind = error.name(), "{}", error);
        error
    }
}

impl Default for CloudPaymentsValidator {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}
