//! Short code derivation and custom code validation.
//!
//! Generated codes are derived from the original URL salted with a nanosecond
//! timestamp, so two requests for the same URL produce different codes - this
//! is not a content-addressing scheme. Collision detection is left to the
//! store's unique constraint.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::MAX_SHORT_CODE_LENGTH;
use crate::error::AppError;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Derives a short code for the given URL.
///
/// The URL is concatenated with the current nanosecond timestamp, hashed with
/// SHA-256, and the digest's decimal rendering is base58-encoded (Bitcoin
/// alphabet, no ambiguous glyphs). The result is truncated - never padded - to
/// `short_len`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the encoding produces an empty string;
/// an empty code must never be returned silently.
pub fn generate_code(original_url: &str, short_len: usize) -> Result<String, AppError> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let input = format!("{}:{}", original_url, nanos);
    let digest = Sha256::digest(input.as_bytes());

    let decimal = digest_to_decimal(&digest);
    let encoded = bs58::encode(decimal.as_bytes()).into_string();

    if encoded.is_empty() {
        return Err(AppError::internal(
            "Failed to encode short code",
            json!({ "url": original_url }),
        ));
    }

    Ok(encoded.chars().take(short_len).collect())
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Non-empty, at most 20 characters
/// - ASCII alphanumeric only
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_SHORT_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 1-20 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters and digits",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

/// Renders a big-endian byte string as its decimal integer form.
fn digest_to_decimal(bytes: &[u8]) -> String {
    let mut num = bytes.to_vec();
    let mut digits: Vec<u8> = Vec::new();

    // Repeated division by 10 over the big-endian representation.
    while num.iter().any(|&b| b != 0) {
        let mut rem: u32 = 0;
        for b in num.iter_mut() {
            let acc = (rem << 8) | u32::from(*b);
            *b = (acc / 10) as u8;
            rem = acc % 10;
        }
        digits.push(rem as u8);
    }

    if digits.is_empty() {
        digits.push(0);
    }

    digits.iter().rev().map(|d| char::from(b'0' + d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// The Bitcoin base58 alphabet used by `bs58`.
    const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

    #[test]
    fn test_generate_code_respects_length() {
        for len in [1, 4, 6, 12, 20] {
            let code = generate_code("https://example.com/page", len).unwrap();
            assert!(!code.is_empty());
            assert!(code.len() <= len, "code '{}' exceeds {}", code, len);
        }
    }

    #[test]
    fn test_generate_code_alphabet_conformant() {
        let code = generate_code("https://example.com/page", 20).unwrap();
        assert!(
            code.chars().all(|c| ALPHABET.contains(c)),
            "code '{}' contains characters outside the base58 alphabet",
            code
        );
    }

    #[test]
    fn test_generate_code_time_salted() {
        // Same URL, different calls: the timestamp salt must yield distinct
        // codes. Use a generous length so truncation does not mask differences.
        let mut codes = HashSet::new();
        for _ in 0..50 {
            codes.insert(generate_code("https://example.com", 20).unwrap());
        }
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_digest_to_decimal_known_values() {
        assert_eq!(digest_to_decimal(&[0]), "0");
        assert_eq!(digest_to_decimal(&[]), "0");
        assert_eq!(digest_to_decimal(&[1, 0]), "256");
        assert_eq!(digest_to_decimal(&[255, 255]), "65535");
        assert_eq!(digest_to_decimal(&[1, 0, 0, 0]), "16777216");
    }

    #[test]
    fn test_validate_custom_code_ok() {
        assert!(validate_custom_code("promo1").is_ok());
        assert!(validate_custom_code("A").is_ok());
        assert!(validate_custom_code("aB3").is_ok());
        assert!(validate_custom_code("a".repeat(20).as_str()).is_ok());
    }

    #[test]
    fn test_validate_custom_code_empty() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_custom_code_too_long() {
        assert!(validate_custom_code("a".repeat(21).as_str()).is_err());
    }

    #[test]
    fn test_validate_custom_code_rejects_symbols() {
        assert!(validate_custom_code("my-code").is_err());
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("code!").is_err());
    }
}
