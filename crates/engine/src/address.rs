//! Address validation at the request boundary.
//!
//! Only public account ids (`G...`) are accepted as subscription targets.
//! Secret seeds and any other strkey kinds are rejected.

use std::fmt;

use serde::Serialize;

use watchlist_common::error::AppError;

use crate::strkey::{self, VersionByte};

/// Request field carrying the address.
pub const ADDRESS_FIELD: &str = "address";

/// Message attached to `ADDRESS_FIELD` when validation fails.
pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid public key provided";

/// Returns `true` if `address` is a well-formed Stellar account id.
pub fn is_valid_address(address: &str) -> bool {
    strkey::decode(VersionByte::AccountId, address).is_ok()
}

/// A Stellar account id that has passed validation.
///
/// The only constructor is [`AccountAddress::parse`], so holding one is proof
/// that the string is a valid public key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Validate `address` and wrap it.
    pub fn parse(address: &str) -> Result<Self, AppError> {
        match strkey::decode(VersionByte::AccountId, address) {
            Ok(_) => Ok(Self(address.to_string())),
            Err(e) => {
                tracing::debug!(reason = %e, "Rejected address");
                Err(AppError::field(ADDRESS_FIELD, INVALID_ADDRESS_MESSAGE))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

    fn random_address() -> String {
        strkey::encode(VersionByte::AccountId, &rand::random())
    }

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_address(VALID));
        assert!(is_valid_address(&random_address()));
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(!is_valid_address("invalid"));
        assert!(!is_valid_address("0x3f0c34bf93ad0d9971d04ccc90f705511c838aad"));
    }

    #[test]
    fn test_bad_checksum_is_invalid() {
        let tampered = format!("{}HZ", &VALID[..54]);
        assert_eq!(tampered.len(), VALID.len());
        assert!(!is_valid_address(&tampered));
    }

    #[test]
    fn test_secret_seed_is_invalid() {
        let seed = strkey::encode(VersionByte::SecretSeed, &rand::random());
        assert!(seed.starts_with('S'));
        assert!(!is_valid_address(&seed));
        assert!(!is_valid_address(
            "SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4"
        ));
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(!is_valid_address(&format!(" {}", VALID)));
        assert!(!is_valid_address(&format!("{}\n", VALID)));
    }

    #[test]
    fn test_parse_returns_field_error() {
        let err = AccountAddress::parse("invalid").unwrap_err();
        match err {
            AppError::Validation(extras) => {
                assert_eq!(extras.len(), 1);
                assert_eq!(extras[ADDRESS_FIELD], INVALID_ADDRESS_MESSAGE);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_keeps_address_verbatim() {
        let address = AccountAddress::parse(VALID).unwrap();
        assert_eq!(address.as_str(), VALID);
        assert_eq!(address.to_string(), VALID);
        assert_eq!(serde_json::to_value(&address).unwrap(), VALID);
    }
}
