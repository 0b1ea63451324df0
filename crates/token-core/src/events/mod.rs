//! Domain events and the sinks that record them.
//!
//! The ledger never talks to a transport directly. Every successful mutation
//! hands its events to an [`EventSink`]; the default [`EventLog`] keeps them
//! in memory, in emission order.

mod log;
mod traits;
mod types;

pub use log::EventLog;
pub use traits::EventSink;
pub use types::{EventRecord, LedgerEvent};
