//! Error types for the CloudPayments client

use std::fmt;
use thiserror::Error;

/// Result type alias for CloudPayments operations
pub type Result<T> = std::result::Result<T, CloudPaymentsError>;

/// Constraint a field failed to satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Required field is absent
    Required,
    /// Required field is explicitly `null`
    NotNull,
    /// Value has the wrong JSON type
    Type,
    /// Numeric value is out of range
    Range,
    /// Value is not a member of the allowed set
    OneOf,
    /// The input as a whole has the wrong shape
    Schema,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field (`Payer.City` for nested fields)
    pub field: String,
    /// Which constraint was violated
    pub rule: Rule,
    /// Human-readable description
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collected violations of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    /// Whether any field failed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the named field has at least one violation
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Iterate over the violations
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        f.write_str("}")
    }
}

/// Main error type for CloudPayments operations
#[derive(Error, Debug)]
pub enum CloudPaymentsError {
    /// Payment type is not one of the gateway operation modes
    #[error("PaymentTypeError({service}): unsupported payment type: got \"{got}\", must be one of {allowed:?}")]
    PaymentType {
        service: String,
        got: String,
        allowed: &'static [&'static str],
    },

    /// Caller-supplied request data failed validation
    #[error("RequestValidationError({service}): {violations}")]
    RequestValidation {
        service: String,
        violations: Violations,
    },

    /// Gateway response does not have the expected shape
    #[error("ResponseValidationError({service}): {violations}")]
    ResponseValidation {
        service: String,
        violations: Violations,
    },

    /// Transport-level failure talking to the gateway
    #[error("InteractionError({service}): {message}")]
    Interaction {
        service: String,
        status: Option<u16>,
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded data is not in the expected text format
    #[error("Format error: {message}")]
    Format { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CloudPaymentsError {
    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Taxonomy name of this error
    pub fn name(&self) -> &'static str {
        match self {
            Self::PaymentType { .. } => "PaymentTypeError",
            Self::RequestValidation { .. } => "RequestValidationError",
            Self::ResponseValidation { .. } => "ResponseValidationError",
            Self::Interaction { .. } => "InteractionError",
            Self::Json(_) => "JsonError",
            Self::Base64(_) => "Base64Error",
            Self::Format { .. } => "FormatError",
            Self::Config { .. } => "ConfigError",
        }
    }

    /// Service tag of the collaborator that raised the error, if any
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::PaymentType { service, .. }
            | Self::RequestValidation { service, .. }
            | Self::ResponseValidation { service, .. }
            | Self::Interaction { service, .. } => Some(service),
            _ => None,
        }
    }

    /// Field violations carried by a validation error
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::RequestValidation { violations, .. }
            | Self::ResponseValidation { violations, .. } => Some(violations),
            _ => None,
        }
    }

    /// HTTP status of a failed interaction, when the gateway answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Interaction { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error was raised by the validator
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::PaymentType { .. } | Self::RequestValidation { .. } | Self::ResponseValidation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_error_message() {
        let error = CloudPaymentsError::PaymentType {
            service: "cloudpayments".to_string(),
            got: "refund".to_string(),
            allowed: &["auth", "charge"],
        };

        let message = error.to_string();
        assert!(message.starts_with("PaymentTypeError(cloudpayments)"));
        assert!(message.contains("\"refund\""));
        assert!(message.contains("[\"auth\", \"charge\"]"));
        assert_eq!(error.name(), "PaymentTypeError");
        assert!(error.is_validation());
    }

    #[test]
    fn test_validation_error_renders_violations() {
        let violations = Violations(vec![
            Violation::new("Amount", Rule::Range, "Must be greater than or equal to 0.01."),
            Violation::new("Token", Rule::Required, "Missing data for required field."),
        ]);
        let error = CloudPaymentsError::RequestValidation {
            service: "svc".to_string(),
            violations,
        };

        assert_eq!(
            error.to_string(),
            "RequestValidationError(svc): {Amount: Must be greater than or equal to 0.01., Token: Missing data for required field.}"
        );
        assert!(error.violations().unwrap().contains_field("Token"));
        assert_eq!(error.service(), Some("svc"));
    }

    #[test]
    fn test_interaction_error_status() {
        let error = CloudPaymentsError::Interaction {
            service: "svc".to_string(),
            status: Some(500),
            message: "gateway answered with status 500".to_string(),
        };

        assert_eq!(error.status(), Some(500));
        assert_eq!(error.name(), "InteractionError");
        assert!(!error.is_validation());
        assert!(error.violations().is_none());
    }

    #[test]
    fn test_ambient_errors_have_no_service() {
        let error = CloudPaymentsError::config("public id cannot be empty");
        assert_eq!(error.service(), None);
        assert!(error.to_string().contains("Configuration error"));
    }
}
