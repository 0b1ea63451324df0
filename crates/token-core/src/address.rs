//! Account identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

/// Opaque account identifier.
///
/// The nil UUID is reserved as the zero identifier: it can never send,
/// receive, own an approval, or be approved as a spender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Uuid);

impl Address {
    /// The reserved zero identifier.
    pub const ZERO: Address = Address(Uuid::nil());

    /// A fresh random identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic identifier, e.g. for the n-th signer of a harness.
    ///
    /// `from_u128(0)` is the zero identifier.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Address {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| LedgerError::InvalidArgument(format!("invalid address {:?}: {}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_nil() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::from_u128(0).is_zero());
        assert!(!Address::from_u128(1).is_zero());
        assert!(!Address::new_random().is_zero());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let addr = Address::from_u128(42);
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-an-address".parse::<Address>().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Address::ZERO).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
