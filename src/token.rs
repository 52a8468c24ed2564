//! Encoded payment tokens
//!
//! Wallet providers such as Yandex Pay hand out the payment token wrapped in
//! standard base64. The gateway expects the decoded ASCII token.

use crate::{CloudPaymentsError, Result};
use base64::{alphabet, engine::general_purpose, engine::GeneralPurpose, Engine as _};

/// Standard alphabet with padding; non-zero trailing bits are tolerated
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_allow_trailing_bits(true),
);

/// Decode a base64-wrapped payment token back to its ASCII form
pub fn decode_token(encoded: &str) -> Result<String> {
    let bytes = TOKEN_ENGINE.decode(encoded.as_bytes())?;
    if !bytes.is_ascii() {
        return Err(CloudPaymentsError::format(
            "Decoded payment token is not ASCII text",
        ));
    }
    String::from_utf8(bytes).map_err(|e| CloudPaymentsError::format(e.to_string()))
}

/// Wrap a payment token in standard base64
pub fn encode_token(token: &str) -> String {
    general_purpose::STANDARD.encode(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_token() {
        let decoded =
            decode_token("c3VjY2Vzc18xMTExYTNlMC0yNDI4LTQ4ZmItYTUzMC0xMjgxNWQ5MGQwZTg=").unwrap();
        assert_eq!(decoded, "success_1111a3e0-2428-48fb-a530-12815d90d0e8");
    }

    #[test]
    fn test_round_trip_printable_ascii() {
        let printable: String = (0x20u8..0x7f).map(char::from).collect();
        for token in ["", "tok123", "a", "ab", "abc", printable.as_str()] {
            assert_eq!(decode_token(&encode_token(token)).unwrap(), token);
        }
    }

    #[test]
    fn test_decode_tolerates_trailing_bits() {
        assert_eq!(decode_token("YWI=").unwrap(), "ab");
        assert_eq!(decode_token("YWJ=").unwrap(), "ab");
        assert_eq!(decode_token("QR==").unwrap(), "A");
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        for raw in ["tok123!", "not base64 at all", "abc"] {
            assert!(matches!(
                decode_token(raw),
                Err(CloudPaymentsError::Base64(_))
            ));
        }
    }

    #[test]
    fn test_decode_rejects_non_ascii_payload() {
        let encoded = general_purpose::STANDARD.encode("токен");
        assert!(matches!(
            decode_token(&encoded),
            Err(CloudPaymentsError::Format { .. })
        ));
    }
}
