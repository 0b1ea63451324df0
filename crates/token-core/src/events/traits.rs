//! Event sink trait definition.

use super::types::LedgerEvent;

/// Append-only destination for ledger events.
///
/// Implementations must:
/// - Keep events in the order they were recorded
/// - Never drop or reorder an accepted event
///
/// Recording is infallible. The ledger applies a mutation and then records
/// its events; there is no way to report a failure without leaving the
/// mutation half-reported.
pub trait EventSink {
    /// Append one event.
    fn record(&mut self, event: LedgerEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: LedgerEvent) {
        (**self).record(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: LedgerEvent) {
        (**self).record(event);
    }
}

impl EventSink for Vec<LedgerEvent> {
    fn record(&mut self, event: LedgerEvent) {
        self.push(event);
    }
}
