//! # Token Core
//!
//! Core library for a fixed-supply fungible token: balance accounting,
//! transfer validation and delegated-spend (allowance) tracking.
//!
//! This crate holds the ledger model only. Callers authenticate identities,
//! drive the operations and consume the emitted events; transport, fees and
//! persistence belong to whatever host embeds the ledger.
//!
//! ## Architecture
//!
//! - **ledger**: [`LedgerCore`], the balance and allowance tables
//! - **events**: `Transfer`/`Approval` events and the [`EventSink`] seam
//! - **shared**: [`SharedLedger`], a lock-serialized handle for threads
//! - **probe**: [`BalanceProbe`], per-account balance deltas for harnesses
//! - **address**: the opaque [`Address`] identifier and its zero value

pub mod address;
pub mod error;
pub mod events;
pub mod ledger;
pub mod probe;
pub mod shared;

pub use address::Address;
pub use error::{AddressRole, ErrorKind, LedgerError, Result};
pub use events::{EventLog, EventRecord, EventSink, LedgerEvent};
pub use ledger::LedgerCore;
pub use probe::BalanceProbe;
pub use shared::SharedLedger;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
