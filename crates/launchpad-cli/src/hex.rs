//! Hex text <-> message bytes.

use launchpad_core::protocol::MESSAGE_LEN;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("odd number of hex digits in '{0}'")]
    OddLength(String),
    #[error("invalid hex digit in '{0}'")]
    InvalidDigit(String),
    #[error("expected {expected} bytes, got {actual} in '{input}'")]
    WrongLength {
        input: String,
        expected: usize,
        actual: usize,
    },
}

/// Parse hex text such as `"90237f"`, `"90 23 7f"` or `"0x90 0x23 0x7f"`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let digits: String = input
        .split_whitespace()
        .map(|part| part.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();

    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(input.to_string()));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| HexError::InvalidDigit(input.to_string()))
        })
        .collect()
}

/// Parse hex text that must hold exactly one message.
pub fn parse_message(input: &str) -> Result<Vec<u8>, HexError> {
    let bytes = parse_hex(input)?;
    if bytes.len() != MESSAGE_LEN {
        return Err(HexError::WrongLength {
            input: input.to_string(),
            expected: MESSAGE_LEN,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("90237f").unwrap(), vec![0x90, 0x23, 0x7f]);
        assert_eq!(parse_hex("90 23 7F").unwrap(), vec![0x90, 0x23, 0x7f]);
        assert_eq!(parse_hex("0xb0 0x6a 0x00").unwrap(), vec![0xb0, 0x6a, 0x00]);
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(parse_hex("902"), Err(HexError::OddLength("902".into())));
        assert_eq!(parse_hex("zz"), Err(HexError::InvalidDigit("zz".into())));
        // Multibyte characters must not panic on slicing.
        assert!(parse_hex("é9").is_err());
    }

    #[test]
    fn test_parse_message_length() {
        assert!(parse_message("b06a00").is_ok());
        let err = parse_message("b06a").unwrap_err();
        assert!(err.to_string().contains("expected 3 bytes, got 2"));
    }
}
