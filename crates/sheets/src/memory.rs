//! In-memory data store
//!
//! Holds fixture tables per data set. Used for development without
//! credentials and in tests, where injected failures drive the fallback path.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use vyapar_core::{DataSet, DataStore, Error, RawTable, Result, TableSet};

/// Fixture-backed data store
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<TableSet>,
    /// Number of upcoming reads that fail
    fail_next: AtomicUsize,
    /// Data sets whose every read fails
    unavailable: RwLock<Vec<DataSet>>,
    reads: Mutex<Vec<DataSet>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, data_set: DataSet, table: RawTable) -> Self {
        self.tables.write().insert(data_set, table);
        self
    }

    pub fn set_table(&self, data_set: DataSet, table: RawTable) {
        self.tables.write().insert(data_set, table);
    }

    /// Fail the next `count` reads, then recover
    pub fn fail_next_reads(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    /// Fail every read of `data_set` until [`restore`](Self::restore)
    pub fn make_unavailable(&self, data_set: DataSet) {
        let mut unavailable = self.unavailable.write();
        if !unavailable.contains(&data_set) {
            unavailable.push(data_set);
        }
    }

    pub fn restore(&self) {
        self.unavailable.write().clear();
        self.fail_next.store(0, Ordering::SeqCst);
    }

    /// Data sets read so far, in call order (failed reads included)
    pub fn reads(&self) -> Vec<DataSet> {
        self.reads.lock().clone()
    }

    pub fn clear_reads(&self) {
        self.reads.lock().clear();
    }

    fn take_injected_failure(&self) -> bool {
        self.fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn read(&self, data_set: DataSet) -> Result<RawTable> {
        self.reads.lock().push(data_set);

        if self.take_injected_failure() {
            return Err(Error::data_store(format!("{}: injected failure", data_set)));
        }
        if self.unavailable.read().contains(&data_set) {
            return Err(Error::data_store(format!("{}: unavailable", data_set)));
        }

        // A missing fixture reads as an empty range, like the sheets API
        Ok(self.tables.read().get(&data_set).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vyapar_core::raw_table;

    fn store() -> InMemoryStore {
        InMemoryStore::new().with_table(
            DataSet::Inventory,
            raw_table([["Product", "A", "B", "Total"], ["MH", "1", "2", "3"]]),
        )
    }

    #[tokio::test]
    async fn test_read_fixture_and_missing() {
        let store = store();
        assert_eq!(store.read(DataSet::Inventory).await.unwrap().len(), 2);
        assert!(store.read(DataSet::Expenses).await.unwrap().is_empty());
        assert_eq!(store.reads(), vec![DataSet::Inventory, DataSet::Expenses]);
    }

    #[tokio::test]
    async fn test_fail_next_reads_recovers() {
        let store = store();
        store.fail_next_reads(1);
        assert!(store.read(DataSet::Inventory).await.is_err());
        assert!(store.read(DataSet::Inventory).await.is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_data_set() {
        let store = store();
        store.make_unavailable(DataSet::Expenses);
        let err = store
            .batch_read(&[DataSet::Inventory, DataSet::Expenses])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expenses"));

        store.restore();
        let tables = store.batch_read(&DataSet::ALL).await.unwrap();
        assert_eq!(tables.len(), 3);
    }
}
