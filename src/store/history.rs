use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::kv::{KvStore, StoreError};

pub const HISTORY_SLOT: &str = "type-history";
pub const HISTORY_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub wpm: u32,
    pub accuracy: u32,
    pub date: String,
    pub mode: String,
}

impl HistoryEntry {
    pub fn is_fast(&self) -> bool {
        self.wpm > 50
    }

    pub fn is_perfect(&self) -> bool {
        self.accuracy == 100
    }
}

/// Most-recent-first list of past results, capped at [`HISTORY_LIMIT`].
pub struct HistoryStore<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        let entries = Self::decode(&store);
        Self { store, entries }
    }

    fn decode(store: &S) -> Vec<HistoryEntry> {
        let Some(bytes) = store.get(HISTORY_SLOT) else {
            return Vec::new();
        };
        match serde_json::from_slice::<Vec<HistoryEntry>>(&bytes) {
            Ok(mut entries) => {
                entries.truncate(HISTORY_LIMIT);
                entries
            }
            Err(err) => {
                warn!(error = %err, "discarding malformed history");
                Vec::new()
            }
        }
    }

    /// Re-read the persisted list. Absent or malformed data is an empty list.
    pub fn load(&self) -> Vec<HistoryEntry> {
        Self::decode(&self.store)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Prepend `entry`, keep the newest [`HISTORY_LIMIT`], then persist. The
    /// in-memory list is updated even when the write fails.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);

        let json = serde_json::to_vec(&self.entries).map_err(|source| StoreError::Encode {
            slot: HISTORY_SLOT.to_string(),
            source,
        })?;
        self.store.set(HISTORY_SLOT, &json)
    }

    /// Build an entry stamped at `at`. Ids are Unix milliseconds, bumped past
    /// the newest stored id so they stay unique and increasing.
    pub fn entry_at<Tz: TimeZone>(
        &self,
        wpm: u32,
        accuracy: u32,
        mode: String,
        at: &DateTime<Tz>,
    ) -> HistoryEntry
    where
        Tz::Offset: std::fmt::Display,
    {
        let millis = at.timestamp_millis();
        let id = match self.entries.first() {
            Some(newest) if newest.id >= millis => newest.id + 1,
            _ => millis,
        };
        HistoryEntry {
            id,
            wpm,
            accuracy,
            date: at.format("%H:%M").to_string(),
            mode,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
