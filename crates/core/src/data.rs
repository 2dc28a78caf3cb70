//! Data sets and raw tables as returned by the data store

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the three business record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSet {
    Inventory,
    Transactions,
    Expenses,
}

impl DataSet {
    pub const ALL: [DataSet; 3] = [DataSet::Inventory, DataSet::Transactions, DataSet::Expenses];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Transactions => "transactions",
            Self::Expenses => "expenses",
        }
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header row followed by data rows, verbatim from the store
pub type RawTable = Vec<Vec<String>>;

/// Raw tables keyed by data set
pub type TableSet = BTreeMap<DataSet, RawTable>;

/// Build a raw table from string literals (fixtures and tests)
pub fn raw_table<R, C>(rows: R) -> RawTable
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}
