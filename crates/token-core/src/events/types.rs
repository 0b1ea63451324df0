//! Event data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// An event emitted by a successful ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// `amount` moved from `from` to `to`
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },

    /// `spender` may now move `amount` out of `owner`'s balance
    Approval {
        owner: Address,
        spender: Address,
        amount: u128,
    },
}

impl LedgerEvent {
    pub fn transfer(from: Address, to: Address, amount: u128) -> Self {
        LedgerEvent::Transfer { from, to, amount }
    }

    pub fn approval(owner: Address, spender: Address, amount: u128) -> Self {
        LedgerEvent::Approval {
            owner,
            spender,
            amount,
        }
    }

    /// Event name as a host chain would log it.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Transfer { .. } => "Transfer",
            LedgerEvent::Approval { .. } => "Approval",
        }
    }

    pub fn amount(&self) -> u128 {
        match self {
            LedgerEvent::Transfer { amount, .. } | LedgerEvent::Approval { amount, .. } => *amount,
        }
    }
}

/// An event as stored by an [`EventLog`](super::EventLog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0
    pub sequence: u64,

    /// When the log accepted the event
    pub recorded_at: DateTime<Utc>,

    #[serde(flatten)]
    pub event: LedgerEvent,
}
