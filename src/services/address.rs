//! Wallet address normalization
//!
//! Every store and the statistics aggregator key off normalized addresses,
//! so case variants coming from different wallet providers resolve to the
//! same identity.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::error::ApiError;

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
}

/// Lower-cased, format-validated wallet address. Only constructible through
/// [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedAddress(String);

impl NormalizedAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate `0x` + 40 hex digits and lower-case.
pub fn normalize(raw: &str) -> Result<NormalizedAddress, ApiError> {
    let trimmed = raw.trim();
    if !ADDRESS_RE.is_match(trimmed) {
        return Err(ApiError::InvalidAddress);
    }
    Ok(NormalizedAddress(trimmed.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_mixed_case_addresses() {
        let normalized = normalize("0xABCDabcd1234ABCDabcd1234ABCDabcd1234ABCD").unwrap();
        assert_eq!(
            normalized.as_str(),
            "0xabcdabcd1234abcdabcd1234abcdabcd1234abcd"
        );
    }

    #[test]
    fn case_variants_normalize_to_the_same_identity() {
        let a = normalize("0xABCDabcd1234ABCDabcd1234ABCDabcd1234ABCD").unwrap();
        let b = normalize("0xabcdABCD1234abcdABCD1234abcdABCD1234abcd").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in [
            "",
            "0x",
            "0x123",
            "abcdabcd1234abcdabcd1234abcdabcd1234abcd",
            "0xZZZZabcd1234abcdabcd1234abcdabcd1234abcd",
            "0xabcdabcd1234abcdabcd1234abcdabcd1234abcd00",
        ] {
            assert!(
                matches!(normalize(raw), Err(ApiError::InvalidAddress)),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let normalized = normalize(" 0x1111111111111111111111111111111111111111 ").unwrap();
        assert_eq!(
            normalized.as_str(),
            "0x1111111111111111111111111111111111111111"
        );
    }
}
