//! Reference number validation.
//!
//! A reference number is the join key between an appointment and a purchase order. It is checked
//! syntactically here before it is ever handed to a store.

use crate::constants::MAX_REFERENCE_LEN;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference number cannot be empty")]
    Empty,
    #[error("reference number exceeds maximum length of {MAX_REFERENCE_LEN} characters")]
    TooLong,
    #[error("reference number contains invalid characters (only ASCII letters, digits and '-' allowed)")]
    InvalidCharacters,
}

/// Returns true if `input` is a syntactically valid reference number.
///
/// Valid references are 1 to 50 bytes of ASCII letters, digits and `-`. This is a pure check with
/// no side effects, so repeated calls always agree.
pub fn is_valid_reference(input: &str) -> bool {
    check_reference(input).is_ok()
}

fn check_reference(input: &str) -> Result<(), ReferenceError> {
    if input.is_empty() {
        return Err(ReferenceError::Empty);
    }

    // Every accepted byte is ASCII, so byte length equals character count here.
    let ok = input
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-'));
    if !ok {
        return Err(ReferenceError::InvalidCharacters);
    }

    if input.len() > MAX_REFERENCE_LEN {
        return Err(ReferenceError::TooLong);
    }

    Ok(())
}

/// A purchase-order reference number that has passed the format check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    /// Parses `input` into a `ReferenceNumber`.
    ///
    /// The input is taken verbatim; no trimming or case folding is applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceError`] describing the first rule the input breaks.
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        check_reference(input)?;
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_references() {
        assert!(is_valid_reference("PO-001"));
        assert!(is_valid_reference("PO12345"));
        assert!(is_valid_reference("a"));
        assert!(is_valid_reference("-"));
        assert!(is_valid_reference("abc-DEF-123"));
    }

    #[test]
    fn test_length_boundaries() {
        let max = "A".repeat(MAX_REFERENCE_LEN);
        let over = "A".repeat(MAX_REFERENCE_LEN + 1);

        assert!(is_valid_reference(&max));
        assert_eq!(ReferenceNumber::parse(&over), Err(ReferenceError::TooLong));
        assert_eq!(ReferenceNumber::parse(""), Err(ReferenceError::Empty));
    }

    #[test]
    fn test_rejects_invalid_characters() {
        for bad in ["!!!bad!!!", "PO 001", "PO_001", "PO.001", "PO-0Ü1", " PO-001", "PO-001\n"] {
            assert_eq!(
                ReferenceNumber::parse(bad),
                Err(ReferenceError::InvalidCharacters),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_check_is_repeatable() {
        for input in ["PO-001", "!!!bad!!!", "", "MULTI"] {
            let first = is_valid_reference(input);
            for _ in 0..3 {
                assert_eq!(is_valid_reference(input), first);
            }
        }
    }

    #[test]
    fn test_parse_preserves_input() {
        let reference = ReferenceNumber::parse("po-042").unwrap();

        assert_eq!(reference.as_str(), "po-042");
        assert_eq!(reference.to_string(), "po-042");
    }
}
