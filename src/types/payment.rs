//! Payment request types

use super::constants::{CARD_PAY_URL, DEFAULT_CURRENCY, PAYMENT_TYPES, TOKEN_PAY_URL};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Gateway operation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentType {
    /// Two-stage payment: the amount is held until confirmed
    Auth,
    /// One-stage payment: the amount is charged immediately
    #[default]
    Charge,
}

impl PaymentType {
    /// Wire representation appended to the endpoint path
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => PAYMENT_TYPES[0],
            Self::Charge => PAYMENT_TYPES[1],
        }
    }

    /// Look up the payment type matching `value` exactly
    pub fn from_wire(value: &str) -> Option<Self> {
        [Self::Auth, Self::Charge]
            .into_iter()
            .find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional payer details attached to card payments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

/// Fields shared by card and token payments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentBase {
    /// Payment amount; the gateway rejects anything below 0.01
    #[serde(with = "amount")]
    pub amount: Decimal,
    /// ISO currency code
    pub currency: String,
    /// Free-form payment purpose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Merchant-side payer identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Merchant-side order identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    /// Payer e-mail for the receipt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Arbitrary metadata stored with the transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_data: Option<Map<String, Value>>,
}

impl PaymentBase {
    /// Create base fields for `amount` in the default currency
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            description: None,
            account_id: None,
            invoice_id: None,
            email: None,
            json_data: None,
        }
    }
}

/// Request body for the `/payments/cards/{type}` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardPaymentRequest {
    #[serde(flatten)]
    pub base: PaymentBase,
    /// Payer IP address
    pub ip_address: String,
    /// Encrypted card data produced by the checkout script
    pub card_cryptogram_packet: String,
    /// Cardholder name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    /// Locale of gateway notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<PayerData>,
}

/// Request body for the `/payments/tokens/{type}` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenPaymentRequest {
    #[serde(flatten)]
    pub base: PaymentBase,
    /// Previously issued payment token
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// A validated request body bound to its endpoint family
pub trait PaymentRequest: Serialize + Send + Sync {
    /// Endpoint path prefix; the payment type is appended to it
    const PATH: &'static str;

    /// Shared payment fields
    fn base(&self) -> &PaymentBase;
}

impl PaymentRequest for CardPaymentRequest {
    const PATH: &'static str = CARD_PAY_URL;

    fn base(&self) -> &PaymentBase {
        &self.base
    }
}

impl PaymentRequest for TokenPaymentRequest {
    const PATH: &'static str = TOKEN_PAY_URL;

    fn base(&self) -> &PaymentBase {
        &self.base
    }
}

/// Parse a JSON number or numeric string into a decimal
pub(crate) fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };

    if text.contains(['e', 'E']) {
        Decimal::from_scientific(&text).ok()
    } else {
        Decimal::from_str(&text).ok()
    }
}

/// Parse a JSON number or numeric string as a finite float
///
/// Used to tell out-of-range amounts from values that are not numbers at all.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

/// Amounts travel as JSON numbers but may arrive as numeric strings
mod amount {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let value = amount
            .to_f64()
            .ok_or_else(|| S::Error::custom(format!("amount {amount} is not representable")))?;
        serializer.serialize_f64(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::parse_decimal(&value).ok_or_else(|| D::Error::custom("Not a valid number."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_type_wire_names() {
        assert_eq!(PaymentType::Auth.as_str(), "auth");
        assert_eq!(PaymentType::Charge.to_string(), "charge");
        assert_eq!(PaymentType::default(), PaymentType::Charge);
        assert_eq!(PaymentType::from_wire("auth"), Some(PaymentType::Auth));
        assert_eq!(PaymentType::from_wire("Charge"), None);
    }

    #[test]
    fn test_parse_decimal_inputs() {
        assert_eq!(parse_decimal(&json!(0.01)), Decimal::from_str("0.01").ok());
        assert_eq!(parse_decimal(&json!(10)), Some(Decimal::from(10)));
        assert_eq!(parse_decimal(&json!("12.50")), Decimal::from_str("12.50").ok());
        assert_eq!(parse_decimal(&json!(1e-5)), Decimal::from_str("0.00001").ok());
        assert_eq!(parse_decimal(&json!("ten")), None);
        assert_eq!(parse_decimal(&json!(true)), None);
    }

    #[test]
    fn test_parse_number_inputs() {
        assert_eq!(parse_number(&json!(1e30)), Some(1e30));
        assert_eq!(parse_number(&json!("1e30")), Some(1e30));
        assert_eq!(parse_number(&json!("12.50")), Some(12.5));
        assert_eq!(parse_number(&json!("inf")), None);
        assert_eq!(parse_number(&json!("NaN")), None);
        assert_eq!(parse_number(&json!("ten")), None);
        assert_eq!(parse_decimal(&json!(1e30)), None);
    }

    #[test]
    fn test_card_request_wire_format() {
        let request = CardPaymentRequest {
            base: PaymentBase::new(Decimal::from_str("10.5").unwrap()),
            ip_address: "1.2.3.4".to_string(),
            card_cryptogram_packet: "packet".to_string(),
            name: None,
            payment_url: None,
            culture_name: Some("en-US".to_string()),
            payer: Some(PayerData {
                first_name: Some("Ivan".to_string()),
                ..PayerData::default()
            }),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["Amount"], json!(10.5));
        assert_eq!(body["Currency"], "RUB");
        assert_eq!(body["IpAddress"], "1.2.3.4");
        assert_eq!(body["CardCryptogramPacket"], "packet");
        assert_eq!(body["CultureName"], "en-US");
        assert_eq!(body["Payer"], json!({ "FirstName": "Ivan" }));
        assert!(body.get("Name").is_none());
        assert!(body.get("Description").is_none());
    }

    #[test]
    fn test_token_request_deserializes_flattened_base() {
        let request: TokenPaymentRequest = serde_json::from_value(json!({
            "Amount": "1",
            "Currency": "USD",
            "Token": "tok",
            "AccountId": "user_x"
        }))
        .unwrap();

        assert_eq!(request.base.amount, Decimal::from(1));
        assert_eq!(request.base.currency, "USD");
        assert_eq!(request.base.account_id.as_deref(), Some("user_x"));
        assert_eq!(request.token, "tok");
        assert_eq!(request.base().currency, "USD");
        assert_eq!(TokenPaymentRequest::PATH, "/payments/tokens/");
    }
}
