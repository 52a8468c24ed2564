//! Gateway endpoints and the enumerated value domains it accepts

use std::time::Duration;

/// CloudPayments API root
pub const BASE_URL: &str = "https://api.cloudpayments.ru";

/// Path prefix for cryptogram (card) payments; the payment type is appended
pub const CARD_PAY_URL: &str = "/payments/cards/";

/// Path prefix for saved-token payments; the payment type is appended
pub const TOKEN_PAY_URL: &str = "/payments/tokens/";

/// Connect and whole-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Service tag attached to errors and log events
pub const DEFAULT_SERVICE: &str = "cloudpayments";

/// Gateway operation modes
pub const PAYMENT_TYPES: &[&str] = &["auth", "charge"];

/// Currency used when a request omits `Currency`
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Currencies accepted by the gateway
pub const CURRENCIES: &[&str] = &[
    "RUB", "EUR", "USD", "GRB", "UAH", "BYR", "BYN", "KZT", "AZN", "CHF", "CZK", "CAD", "PLN",
    "SEK", "TRY", "CNY", "INR", "BRL", "ZAR", "UZS", "BGN", "RON", "AUD", "HKD", "GEL", "KGS",
    "AMD", "AED",
];

/// Locale tags accepted in `CultureName`
pub const CULTURE_NAMES: &[&str] = &["ru-RU", "en-US", "lv", "az", "kk", "uk", "pl", "vi", "tr"];

/// Check if a currency code is accepted
pub fn is_supported_currency(code: &str) -> bool {
    CURRENCIES.contains(&code)
}

/// Check if a locale tag is accepted
pub fn is_supported_culture(tag: &str) -> bool {
    CULTURE_NAMES.contains(&tag)
}
