//! Data store collaborator

use async_trait::async_trait;

use crate::{DataSet, RawTable, Result, TableSet};

/// Read-only access to the spreadsheet-backed business records
///
/// Each data set is bound to a fixed range in the store. Implementations
/// must not cache tables across calls; every read returns fresh rows.
///
/// Implementations:
/// - `SheetsClient` - Google Sheets values API
/// - `InMemoryStore` - fixture tables
#[async_trait]
pub trait DataStore: Send + Sync + 'static {
    /// Read one data set
    async fn read(&self, data_set: DataSet) -> Result<RawTable>;

    /// Read several data sets
    ///
    /// The default issues the individual reads concurrently. Stores with a
    /// native batch endpoint should override this with a single call.
    async fn batch_read(&self, data_sets: &[DataSet]) -> Result<TableSet> {
        let reads = data_sets.iter().map(|data_set| async move {
            let table = self.read(*data_set).await?;
            Ok::<_, crate::Error>((*data_set, table))
        });
        let tables = futures::future::try_join_all(reads).await?;
        Ok(tables.into_iter().collect())
    }

    /// Store name for logging
    fn name(&self) -> &str;
}
