//! Error types for token ledger operations.
//!
//! Every failing operation returns one of these synchronously and leaves the
//! ledger exactly as it was before the call. Display strings follow the
//! revert messages of the reference ERC-20 token so harness output reads the
//! same as the scaffolding it replaces.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::Address;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Where a zero identifier showed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressRole {
    Sender,
    Recipient,
    Owner,
    Spender,
}

impl AddressRole {
    fn message(self) -> &'static str {
        match self {
            AddressRole::Sender => "ERC20: transfer from the zero address",
            AddressRole::Recipient => "ERC20: transfer to the zero address",
            AddressRole::Owner => "ERC20: approve from the zero address",
            AddressRole::Spender => "ERC20: approve to the zero address",
        }
    }
}

/// Core error type for ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Malformed constructor input, unparsable identifier or arithmetic overflow
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Zero identifier used where it is disallowed
    #[error("{}", .role.message())]
    ZeroAddress { role: AddressRole },

    /// Debited account holds less than the requested amount
    #[error("ERC20: transfer amount exceeds balance (account {account}, balance {balance}, requested {requested})")]
    InsufficientBalance {
        account: Address,
        balance: u128,
        requested: u128,
    },

    /// Spender's remaining allowance is below the requested amount
    #[error("ERC20: insufficient allowance (owner {owner}, spender {spender}, allowance {allowance}, requested {requested})")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: u128,
        requested: u128,
    },

    /// Ledger invariant violated
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Event export failed
    #[error("Export error: {0}")]
    Export(String),
}

/// Stable, serializable classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    ZeroAddress,
    InsufficientBalance,
    InsufficientAllowance,
    Integrity,
    Export,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::ZeroAddress => "zero_address",
            ErrorKind::InsufficientBalance => "insufficient_balance",
            ErrorKind::InsufficientAllowance => "insufficient_allowance",
            ErrorKind::Integrity => "integrity",
            ErrorKind::Export => "export",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LedgerError::ZeroAddress { .. } => ErrorKind::ZeroAddress,
            LedgerError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            LedgerError::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
            LedgerError::Integrity(_) => ErrorKind::Integrity,
            LedgerError::Export(_) => ErrorKind::Export,
        }
    }

    pub(crate) fn zero(role: AddressRole) -> Self {
        LedgerError::ZeroAddress { role }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Export(err.to_string())
    }
}
