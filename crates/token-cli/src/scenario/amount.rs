//! Integer values in scenario files.
//!
//! TOML integers stop at `i64`, so large amounts may also be written as
//! decimal strings. `"max"` stands for the largest representable amount.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Non-negative token amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(pub u128);

/// Signed balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta(pub i128);

impl Amount {
    pub fn get(self) -> u128 {
        self.0
    }
}

impl Delta {
    pub fn get(self) -> i128 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer, a decimal string, or \"max\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(u128::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
        Ok(Amount(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        u128::try_from(v)
            .map(Amount)
            .map_err(|_| E::custom(format!("amount must not be negative, got {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        let v = v.trim();
        if v.eq_ignore_ascii_case("max") {
            return Ok(Amount(u128::MAX));
        }
        v.replace('_', "")
            .parse::<u128>()
            .map(Amount)
            .map_err(|e| E::custom(format!("invalid amount {:?}: {}", v, e)))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct DeltaVisitor;

impl<'de> Visitor<'de> for DeltaVisitor {
    type Value = Delta;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Delta, E> {
        Ok(Delta(i128::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Delta, E> {
        Ok(Delta(i128::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Delta, E> {
        Ok(Delta(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Delta, E> {
        v.trim()
            .replace('_', "")
            .parse::<i128>()
            .map(Delta)
            .map_err(|e| E::custom(format!("invalid balance change {:?}: {}", v, e)))
    }
}

impl<'de> Deserialize<'de> for Delta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DeltaVisitor)
    }
}
