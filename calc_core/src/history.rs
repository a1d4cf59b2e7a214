//! # Calculation History
//!
//! The saved-calculation list: an ordered sequence of
//! [`CalculationRecord`]s, newest first, stored as one JSON array under a
//! single key in a [`KeyValueStore`].
//!
//! Every mutation is a whole-list read-modify-write run through
//! [`KeyValueStore::update`]. The backend keeps other writers (threads, or
//! other processes sharing a file store directory) out between the read and
//! the write, so no update is lost.
//!
//! A stored value that is missing or fails to parse reads as an empty list.
//! A value that cannot be *read* is an error for every mutation; only the
//! display-oriented [`History::load`] swallows it.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::history::History;
//! use calc_core::input::FormState;
//! use calc_core::record::RecordBuilder;
//! use calc_core::store::MemoryStore;
//!
//! let history = History::new(MemoryStore::new());
//!
//! let mut form = FormState::default();
//! form.project_name = "Driveway".to_string();
//! let saved = history.add(RecordBuilder::new(&form).build()?)?;
//!
//! assert_eq!(history.load()[0].id, saved.id);
//! assert!(history.delete(saved.id)?);
//! assert!(history.load().is_empty());
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use crate::errors::{CalcError, CalcResult};
use crate::record::CalculationRecord;
use crate::store::KeyValueStore;

/// Storage key of the history list
pub const HISTORY_KEY: &str = "concreteCalculations";

/// Repository over the stored record list.
pub struct History<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> History<S> {
    /// History under the default key.
    pub fn new(store: S) -> Self {
        History::with_key(store, HISTORY_KEY)
    }

    /// History under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        History {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records, newest first, for display. Never fails: an absent,
    /// unreadable, or malformed stored value reads as empty.
    pub fn load(&self) -> Vec<CalculationRecord> {
        match self.store.get(&self.key) {
            Ok(raw) => self.parse(raw.as_deref()),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read saved calculations");
                Vec::new()
            }
        }
    }

    /// Replace the stored list.
    pub fn save(&self, records: &[CalculationRecord]) -> CalcResult<()> {
        let json = serde_json::to_string(records).map_err(CalcError::serialization)?;
        self.store.set(&self.key, &json)
    }

    /// Prepend a record and store the list.
    ///
    /// If the record's id is not newer than the current head (two saves in
    /// the same millisecond), it is stored under `head.id + 1` so ids stay
    /// unique and descending. Returns the record as stored.
    ///
    /// # Errors
    ///
    /// A store read or write failure leaves the stored list untouched.
    pub fn add(&self, record: CalculationRecord) -> CalcResult<CalculationRecord> {
        let (record, count) = self.modify(|records| {
            let record = match records.first() {
                Some(head) if record.id <= head.id => {
                    let id = head.id.checked_add(1).ok_or_else(|| {
                        CalcError::storage_error("add", self.key.as_str(), "no record id left after the newest one")
                    })?;
                    record.with_id(id)
                }
                _ => record,
            };
            records.insert(0, record.clone());
            Ok(((record, records.len()), true))
        })?;

        tracing::info!(id = record.id, name = %record.name, count, "saved calculation");
        Ok(record)
    }

    /// Remove the record with `id`. Returns whether one was removed; the
    /// remaining records keep their order.
    pub fn delete(&self, id: i64) -> CalcResult<bool> {
        let remaining = self.modify(|records| {
            let before = records.len();
            records.retain(|r| r.id != id);
            let removed = records.len() != before;
            Ok((removed.then_some(records.len()), removed))
        })?;

        match remaining {
            Some(remaining) => {
                tracing::info!(id, remaining, "deleted calculation");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every record.
    pub fn clear(&self) -> CalcResult<()> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "cleared saved calculations");
        Ok(())
    }

    pub fn find(&self, id: i64) -> Option<CalculationRecord> {
        self.load().into_iter().find(|r| r.id == id)
    }

    /// One read-modify-write cycle over the list. `change` returns its
    /// result and whether the list must be written back.
    fn modify<T>(
        &self,
        change: impl FnOnce(&mut Vec<CalculationRecord>) -> CalcResult<(T, bool)>,
    ) -> CalcResult<T> {
        let mut outcome = None;
        self.store.update(&self.key, |raw| {
            let mut records = self.parse(raw.as_deref());
            let (value, changed) = change(&mut records)?;
            outcome = Some(value);
            if !changed {
                return Ok(raw);
            }
            serde_json::to_string(&records)
                .map(Some)
                .map_err(CalcError::serialization)
        })?;

        outcome.ok_or_else(|| CalcError::Internal {
            message: "store finished an update without running it".to_string(),
        })
    }

    fn parse(&self, raw: Option<&str>) -> Vec<CalculationRecord> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        match serde_json::from_str(raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "saved calculations are malformed, treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FormState;
    use crate::record::RecordBuilder;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    /// Store whose reads fail while its writes go through.
    struct UnreadableStore<'a>(&'a MemoryStore);

    impl KeyValueStore for UnreadableStore<'_> {
        fn get(&self, key: &str) -> CalcResult<Option<String>> {
            Err(CalcError::storage_error("read", key, "device not ready"))
        }

        fn set(&self, key: &str, value: &str) -> CalcResult<()> {
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> CalcResult<()> {
            self.0.remove(key)
        }
    }

    fn record(name: &str, secs: i64) -> CalculationRecord {
        let mut form = FormState::default();
        form.project_name = name.to_string();
        let now = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        RecordBuilder::new(&form).build_at(now).unwrap()
    }

    #[test]
    fn test_empty_when_absent() {
        let history = History::new(MemoryStore::new());
        assert!(history.load().is_empty());
        assert_eq!(history.find(1), None);
    }

    #[test]
    fn test_malformed_reads_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{ definitely not a list").unwrap();
        let history = History::new(store);
        assert!(history.load().is_empty());

        // A save after corruption starts a fresh list
        history.add(record("A", 1)).unwrap();
        assert_eq!(history.load().len(), 1);
    }

    #[test]
    fn test_newest_first() {
        let history = History::new(MemoryStore::new());
        history.add(record("First", 1)).unwrap();
        history.add(record("Second", 2)).unwrap();
        history.add(record("Third", 3)).unwrap();

        let names: Vec<_> = history.load().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Third", "Second", "First"]);
    }

    #[test]
    fn test_same_millisecond_ids_stay_unique() {
        let history = History::new(MemoryStore::new());
        let a = history.add(record("A", 5)).unwrap();
        let b = history.add(record("B", 5)).unwrap();
        assert_eq!(b.id, a.id + 1);
        assert_eq!(history.load()[0].id, b.id);
    }

    #[test]
    fn test_delete_one_preserves_others() {
        let history = History::new(MemoryStore::new());
        let a = history.add(record("A", 1)).unwrap();
        let b = history.add(record("B", 2)).unwrap();
        let c = history.add(record("C", 3)).unwrap();

        assert!(history.delete(b.id).unwrap());
        assert_eq!(history.load(), vec![c.clone(), a.clone()]);

        assert!(!history.delete(b.id).unwrap());
        assert_eq!(history.load(), vec![c, a]);
    }

    #[test]
    fn test_clear() {
        let history = History::new(MemoryStore::new());
        history.add(record("A", 1)).unwrap();
        history.clear().unwrap();
        assert!(history.load().is_empty());
        assert_eq!(history.store().get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let history = History::new(MemoryStore::new());
        std::thread::scope(|s| {
            for t in 0..4 {
                let history = &history;
                s.spawn(move || {
                    for i in 0..10 {
                        history.add(record(&format!("t{t}-{i}"), 1)).unwrap();
                    }
                });
            }
        });

        let records = history.load();
        assert_eq!(records.len(), 40);
        let mut ids: Vec<_> = records.iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 40);
    }

    #[test]
    fn test_custom_key() {
        let history = History::with_key(MemoryStore::new(), "other");
        history.add(record("A", 1)).unwrap();
        assert!(history.store().get(HISTORY_KEY).unwrap().is_none());
        assert!(history.store().get("other").unwrap().is_some());
    }

    #[test]
    fn test_read_failure_keeps_stored_records() {
        let inner = MemoryStore::new();
        let history = History::new(&inner);
        for i in 0..5 {
            history.add(record(&format!("r{i}"), i)).unwrap();
        }
        let before = inner.get(HISTORY_KEY).unwrap();

        let failing = History::new(UnreadableStore(&inner));
        let err = failing.add(record("new", 10)).unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        let err = failing.delete(history.load()[0].id).unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(failing.load().is_empty());

        assert_eq!(inner.get(HISTORY_KEY).unwrap(), before);
        assert_eq!(history.load().len(), 5);
    }

    #[test]
    fn test_id_at_max_is_not_bumped_past_overflow() {
        let history = History::new(MemoryStore::new());
        history.save(&[record("edited", 1).with_id(i64::MAX)]).unwrap();

        let err = history.add(record("next", 2)).unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(history.load().len(), 1);
    }

    #[test]
    fn test_missing_id_delete_leaves_value_untouched() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "not json").unwrap();
        let history = History::new(&store);
        assert!(!history.delete(42).unwrap());
        assert_eq!(store.get(HISTORY_KEY).unwrap().as_deref(), Some("not json"));
    }
}
