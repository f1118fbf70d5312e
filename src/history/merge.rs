//! Merge engine and chronological sorting
//!
//! lshistory reports one event per element version. A single logical change
//! touching several files shows up as consecutive events by the same user,
//! stamped with the same (or nearly the same) time.

use crate::model::{ChangeLogEntry, RawEvent};

/// Groups consecutive events into changelog entries
#[derive(Debug)]
pub struct MergeEngine {
    window_ms: u64,
    current: Option<ChangeLogEntry>,
    entries: Vec<ChangeLogEntry>,
}

impl MergeEngine {
    /// `window_ms` is the largest timestamp gap still treated as the same
    /// transaction; 0 merges exact timestamp matches only.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            current: None,
            entries: Vec::new(),
        }
    }

    /// Feed the next surviving event, in stream order
    pub fn push(&mut self, event: RawEvent) {
        if let Some(entry) = self.current.as_mut()
            && continues(self.window_ms, entry, &event)
        {
            entry.absorb(event);
            return;
        }
        if let Some(done) = self.current.replace(ChangeLogEntry::from_event(event)) {
            self.entries.push(done);
        }
    }

    /// Close the open transaction and return all entries, oldest first
    pub fn finish(mut self) -> Vec<ChangeLogEntry> {
        if let Some(done) = self.current.take() {
            self.entries.push(done);
        }
        sort_chronologically(&mut self.entries);
        self.entries
    }
}

/// Does `event` continue the transaction of `entry`?
///
/// Same user, and a timestamp equal to (or within `window_ms` of) the
/// previous event of the entry.
fn continues(window_ms: u64, entry: &ChangeLogEntry, event: &RawEvent) -> bool {
    if entry.user() != event.user {
        return false;
    }
    let gap_ms = (event.timestamp - entry.last_timestamp())
        .num_milliseconds()
        .unsigned_abs();
    gap_ms <= window_ms
}

/// Merge a sequence of events and sort the result
pub fn merge_events<I>(window_ms: u64, events: I) -> Vec<ChangeLogEntry>
where
    I: IntoIterator<Item = RawEvent>,
{
    let mut engine = MergeEngine::new(window_ms);
    for event in events {
        engine.push(event);
    }
    engine.finish()
}

/// Sort entries by timestamp, keeping merge order for equal timestamps
pub fn sort_chronologically(entries: &mut [ChangeLogEntry]) {
    entries.sort_by_key(ChangeLogEntry::timestamp);
}
