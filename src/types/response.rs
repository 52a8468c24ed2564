//! Gateway response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a payment call as reported by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentResponse {
    /// Whether the gateway accepted the payment
    pub success: bool,
    /// Human-readable outcome or error detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Transaction payload (`TransactionId`, `ReasonCode`, 3-D Secure data, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Map<String, Value>>,
}

impl PaymentResponse {
    /// Gateway transaction identifier, when the model carries one
    pub fn transaction_id(&self) -> Option<i64> {
        self.model.as_ref()?.get("TransactionId")?.as_i64()
    }

    /// Gateway reason code for declined or pending payments
    pub fn reason_code(&self) -> Option<i64> {
        self.model.as_ref()?.get("ReasonCode")?.as_i64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_accessors() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "Success": false,
            "Message": null,
            "Model": { "TransactionId": 504, "ReasonCode": 5051 }
        }))
        .unwrap();

        assert!(!response.success);
        assert_eq!(response.message, None);
        assert_eq!(response.transaction_id(), Some(504));
        assert_eq!(response.reason_code(), Some(5051));
    }

    #[test]
    fn test_accessors_without_model() {
        let response = PaymentResponse {
            success: true,
            message: None,
            model: None,
        };
        assert_eq!(response.transaction_id(), None);
    }
}
