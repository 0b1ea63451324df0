//! In-memory, append-only event log.

use std::io::Write;

use chrono::Utc;

use super::traits::EventSink;
use super::types::{EventRecord, LedgerEvent};
use crate::error::Result;

/// Ordered in-memory event sink.
///
/// Sequence numbers keep increasing across [`drain`](EventLog::drain), so a
/// consumer that drains periodically still sees a gap-free numbering.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    next_sequence: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Events in emission order, without log metadata.
    pub fn events(&self) -> impl Iterator<Item = &LedgerEvent> + '_ {
        self.records.iter().map(|record| &record.event)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    /// Records whose sequence number is at least `sequence`.
    pub fn since(&self, sequence: u64) -> &[EventRecord] {
        let start = self
            .records
            .partition_point(|record| record.sequence < sequence);
        &self.records[start..]
    }

    /// Sequence number the next recorded event will get.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Remove and return every held record.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// Write held records as JSON lines, one record per line.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: LedgerEvent) {
        self.records.push(EventRecord {
            sequence: self.next_sequence,
            recorded_at: Utc::now(),
            event,
        });
        self.next_sequence += 1;
    }
}
