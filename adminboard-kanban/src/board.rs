//! RecordBoard - the in-memory record collection shared with the host module
//!
//! The host's CRUD paths and the commit controller both mutate it. No method
//! holds a guard across an await point.

use crate::types::{Record, RecordId, Status};
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Records keyed by id, in host insertion order
#[derive(Debug, Default)]
pub struct RecordBoard {
    records: RwLock<IndexMap<RecordId, Record>>,
}

impl RecordBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board pre-loaded with `records`
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let board = Self::new();
        for record in records {
            board.insert(record);
        }
        board
    }

    // =========================================================================
    // Host CRUD
    // =========================================================================

    /// Insert or replace a record, returning the previous version
    pub fn insert(&self, record: Record) -> Option<Record> {
        self.write().insert(record.id.clone(), record)
    }

    /// Replace a record that is already on the board.
    ///
    /// Returns the previous version, or `None` (and stores nothing) when the
    /// record is absent.
    pub fn replace(&self, record: Record) -> Option<Record> {
        let mut records = self.write();
        let slot = records.get_mut(&record.id)?;
        Some(std::mem::replace(slot, record))
    }

    /// Remove a record, returning it if it existed
    pub fn remove(&self, id: &RecordId) -> Option<Record> {
        self.write().shift_remove(id)
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.read().contains_key(id)
    }

    /// Copy of every record, in insertion order
    pub fn snapshot(&self) -> Vec<Record> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // =========================================================================
    // Engine mutations
    // =========================================================================

    /// Set the status of a record, returning the record as it was before.
    ///
    /// `None` means the record is not (or no longer) on the board.
    pub fn swap_status(&self, id: &RecordId, status: Status) -> Option<Record> {
        let mut records = self.write();
        let record = records.get_mut(id)?;
        let before = record.clone();
        record.status = status;
        Some(before)
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<RecordId, Record>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<RecordId, Record>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordKind;

    fn record(id: u64) -> Record {
        Record::new(id, RecordKind::KpiTask, format!("KPI-{:03}", id), "업무")
    }

    #[test]
    fn test_insert_replace_remove() {
        let board = RecordBoard::new();
        assert!(board.insert(record(1)).is_none());
        assert!(board.insert(record(1).with_team("영업팀")).is_some());
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(&1u64.into()).unwrap().team, "영업팀");

        assert!(board.remove(&1u64.into()).is_some());
        assert!(board.is_empty());
    }

    #[test]
    fn test_replace_only_existing() {
        let board = RecordBoard::new();
        assert!(board.replace(record(4)).is_none());
        assert!(board.is_empty());

        board.insert(record(4));
        let previous = board.replace(record(4).with_status(Status::OnHold)).unwrap();
        assert_eq!(previous.status, Status::Waiting);
        assert_eq!(board.get(&4u64.into()).unwrap().status, Status::OnHold);
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let board = RecordBoard::with_records([record(3), record(1), record(2)]);
        let ids: Vec<String> = board.snapshot().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);

        board.remove(&1u64.into());
        let ids: Vec<String> = board.snapshot().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn test_swap_status_returns_previous() {
        let board = RecordBoard::with_records([record(7)]);
        let before = board.swap_status(&7u64.into(), Status::Done).unwrap();

        assert_eq!(before.status, Status::Waiting);
        assert_eq!(board.get(&7u64.into()).unwrap().status, Status::Done);
    }

    #[test]
    fn test_swap_status_on_missing_record() {
        let board = RecordBoard::new();
        assert!(board.swap_status(&9u64.into(), Status::Done).is_none());
    }
}
