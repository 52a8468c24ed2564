//! Field rule tables and the routine that interprets them
//!
//! Each payload shape is described by plain data: a slice of [`FieldRule`]s
//! naming the wire field, whether it is required, what it must look like and
//! what to fill in when it is absent. [`apply`] checks an input object against
//! one or more tables, collecting every violation instead of stopping at the
//! first, and returns the normalized object ready for deserialization.

use crate::error::{Rule, Violation, Violations};
use crate::types::constants::{CULTURE_NAMES, CURRENCIES, DEFAULT_CURRENCY};
use crate::types::payment::{parse_decimal, parse_number};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Smallest amount the gateway accepts (0.01)
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Shape a field value must have
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Number or numeric string, not below `min`
    Decimal { min: Decimal },
    /// String, optionally restricted to an enumerated set
    Text { one_of: Option<&'static [&'static str]> },
    /// Boolean
    Bool,
    /// Any JSON object, passed through unchecked
    Object,
    /// JSON object checked against its own rule table
    Nested(&'static [FieldRule]),
}

/// Constraints of a single wire field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    /// Value used when the key is absent
    pub default: Option<&'static str>,
}

impl FieldRule {
    const fn new(name: &'static str, required: bool, kind: FieldKind) -> Self {
        Self {
            name,
            required,
            kind,
            default: None,
        }
    }

    const fn text(name: &'static str) -> Self {
        Self::new(name, false, FieldKind::Text { one_of: None })
    }

    const fn required_text(name: &'static str) -> Self {
        Self::new(name, true, FieldKind::Text { one_of: None })
    }

    const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// Payer subfields; all optional and free-form
pub const PAYER_RULES: &[FieldRule] = &[
    FieldRule::text("FirstName"),
    FieldRule::text("LastName"),
    FieldRule::text("MiddleName"),
    FieldRule::text("Birth"),
    FieldRule::text("Street"),
    FieldRule::text("Address"),
    FieldRule::text("City"),
    FieldRule::text("Country"),
    FieldRule::text("Phone"),
    FieldRule::text("Postcode"),
];

/// Fields shared by every payment request
pub const BASE_RULES: &[FieldRule] = &[
    FieldRule::new("Amount", true, FieldKind::Decimal { min: MIN_AMOUNT }),
    FieldRule::new(
        "Currency",
        false,
        FieldKind::Text {
            one_of: Some(CURRENCIES),
        },
    )
    .with_default(DEFAULT_CURRENCY),
    FieldRule::text("Description"),
    FieldRule::text("AccountId"),
    FieldRule::text("InvoiceId"),
    FieldRule::text("Email"),
    FieldRule::new("JsonData", false, FieldKind::Object),
];

/// Card payment fields on top of [`BASE_RULES`]
pub const CARD_RULES: &[FieldRule] = &[
    FieldRule::required_text("IpAddress"),
    FieldRule::required_text("CardCryptogramPacket"),
    FieldRule::text("Name"),
    FieldRule::text("PaymentUrl"),
    FieldRule::new(
        "CultureName",
        false,
        FieldKind::Text {
            one_of: Some(CULTURE_NAMES),
        },
    ),
    FieldRule::new("Payer", false, FieldKind::Nested(PAYER_RULES)),
];

/// Token payment fields on top of [`BASE_RULES`]
pub const TOKEN_RULES: &[FieldRule] = &[
    FieldRule::required_text("Token"),
    FieldRule::text("IpAddress"),
];

/// Gateway response fields
pub const RESPONSE_RULES: &[FieldRule] = &[
    FieldRule::new("Success", true, FieldKind::Bool),
    FieldRule::text("Message"),
    FieldRule::new("Model", false, FieldKind::Object),
];

const MISSING: &str = "Missing data for required field.";
const NULL: &str = "Field may not be null.";

/// Check `input` against `tables` and return the normalized object
///
/// Keys not named by any rule are dropped. Absent optional fields and
/// optional fields set to `null` are left out of the result, or take the
/// rule's default when it has one.
pub fn apply(input: &Value, tables: &[&[FieldRule]]) -> Result<Map<String, Value>, Violations> {
    let Some(object) = input.as_object() else {
        return Err(Violations(vec![Violation::new(
            "_schema",
            Rule::Schema,
            "Invalid input type.",
        )]));
    };

    let mut violations = Vec::new();
    let output = check_object(object, tables, "", &mut violations);

    if violations.is_empty() {
        Ok(output)
    } else {
        Err(Violations(violations))
    }
}

fn check_object(
    object: &Map<String, Value>,
    tables: &[&[FieldRule]],
    prefix: &str,
    violations: &mut Vec<Violation>,
) -> Map<String, Value> {
    let mut output = Map::new();

    for rule in tables.iter().flat_map(|table| table.iter()) {
        let field = format!("{prefix}{}", rule.name);

        match object.get(rule.name) {
            None if rule.required => {
                violations.push(Violation::new(field, Rule::Required, MISSING));
            }
            Some(Value::Null) if rule.required => {
                violations.push(Violation::new(field, Rule::NotNull, NULL));
            }
            None | Some(Value::Null) => {
                if let Some(default) = rule.default {
                    output.insert(rule.name.to_string(), Value::String(default.to_string()));
                }
            }
            Some(value) => {
                if let Some(normalized) = check_value(rule.kind, value, &field, violations) {
                    output.insert(rule.name.to_string(), normalized);
                }
            }
        }
    }

    output
}

fn check_value(
    kind: FieldKind,
    value: &Value,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    match kind {
        FieldKind::Decimal { min } => {
            let Some(amount) = parse_decimal(value) else {
                // A number that still parses as a float is out of decimal range
                let violation = match parse_number(value) {
                    Some(number) if number < 1.0 => Violation::new(
                        field,
                        Rule::Range,
                        format!("Must be greater than or equal to {min}."),
                    ),
                    Some(_) => Violation::new(
                        field,
                        Rule::Range,
                        format!("Must be less than or equal to {}.", Decimal::MAX),
                    ),
                    None => Violation::new(field, Rule::Type, "Not a valid number."),
                };
                violations.push(violation);
                return None;
            };
            if amount < min {
                violations.push(Violation::new(
                    field,
                    Rule::Range,
                    format!("Must be greater than or equal to {min}."),
                ));
                return None;
            }
            // Kept as text so the typed request gets the exact decimal
            Some(Value::String(amount.normalize().to_string()))
        }
        FieldKind::Text { one_of } => {
            let Some(text) = value.as_str() else {
                violations.push(Violation::new(field, Rule::Type, "Not a valid string."));
                return None;
            };
            if let Some(allowed) = one_of {
                if !allowed.contains(&text) {
                    violations.push(Violation::new(
                        field,
                        Rule::OneOf,
                        format!("Must be one of: {}.", allowed.join(", ")),
                    ));
                    return None;
                }
            }
            Some(value.clone())
        }
        FieldKind::Bool => {
            if value.is_boolean() {
                Some(value.clone())
            } else {
                violations.push(Violation::new(field, Rule::Type, "Not a valid boolean."));
                None
            }
        }
        FieldKind::Object => {
            if value.is_object() {
                Some(value.clone())
            } else {
                violations.push(Violation::new(
                    field,
                    Rule::Type,
                    "Not a valid mapping type.",
                ));
                None
            }
        }
        FieldKind::Nested(rules) => {
            let Some(object) = value.as_object() else {
                violations.push(Violation::new(
                    field,
                    Rule::Type,
                    "Not a valid mapping type.",
                ));
                return None;
            };
            let before = violations.len();
            let nested = check_object(object, &[rules], &format!("{field}."), violations);
            (violations.len() == before).then_some(Value::Object(nested))
        }
    }
}
