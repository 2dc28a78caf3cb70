//! Data routing
//!
//! Maps an intent to the smallest set of data sets that can answer it. The
//! route decides which reads the data store sees, so it bounds per-request I/O.

use vyapar_core::{DataSet, QueryIntent};

const SALES_AND_LEDGER: &[DataSet] = &[DataSet::Transactions, DataSet::Expenses];
const STOCK_AND_MOVEMENTS: &[DataSet] = &[DataSet::Inventory, DataSet::Transactions];
const EVERYTHING: &[DataSet] = &DataSet::ALL;

/// Data sets needed for an intent. Never empty.
pub fn route(intent: QueryIntent) -> &'static [DataSet] {
    match intent {
        QueryIntent::SalesInquiry
        | QueryIntent::FinancialAnalysis
        | QueryIntent::CustomerAnalysis => SALES_AND_LEDGER,
        QueryIntent::InventoryCheck => STOCK_AND_MOVEMENTS,
        QueryIntent::StatusCheck | QueryIntent::GeneralInquiry => EVERYTHING,
    }
}

/// Whether a route covers every data set
pub fn is_full_route(data_sets: &[DataSet]) -> bool {
    DataSet::ALL.iter().all(|ds| data_sets.contains(ds))
}
