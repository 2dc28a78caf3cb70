//! Collaborator traits
//!
//! The pipeline talks to two external services, both injected at
//! construction:
//!
//! ```text
//!   - DataStore: range reads of the business spreadsheet
//!   - LanguageModel: final answer generation
//! ```

mod data_store;
mod llm;

pub use data_store::DataStore;
pub use llm::LanguageModel;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raw_table, DataSet, Error, RawTable, Result};
    use async_trait::async_trait;

    struct EchoStore;

    #[async_trait]
    impl DataStore for EchoStore {
        async fn read(&self, data_set: DataSet) -> Result<RawTable> {
            if data_set == DataSet::Expenses {
                return Err(Error::data_store("expenses range unavailable"));
            }
            Ok(raw_table([vec!["header"], vec![data_set.as_str()]]))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    // Traits must stay object-safe; collaborators are injected as trait objects
    fn _assert_object_safe(_: &dyn DataStore, _: &dyn LanguageModel) {}

    #[tokio::test]
    async fn test_default_batch_read() {
        let store = EchoStore;
        let tables = store
            .batch_read(&[DataSet::Inventory, DataSet::Transactions])
            .await
            .unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[&DataSet::Transactions][1][0], "transactions");
    }

    #[tokio::test]
    async fn test_default_batch_read_fails_as_a_whole() {
        let store = EchoStore;
        let result = store.batch_read(&DataSet::ALL).await;
        assert!(matches!(result, Err(Error::DataStore(_))));
    }
}
