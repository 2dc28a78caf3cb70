//! Typed business records produced by row normalization

use serde::{Deserialize, Serialize};

use crate::DataSet;

/// Stock position of one product across both warehouses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product: String,
    /// Units held at the first warehouse (Pallavi)
    pub warehouse_a_qty: i64,
    /// Units held at the second warehouse (Tularam)
    pub warehouse_b_qty: i64,
    pub total: i64,
}

/// One stock-in or sale movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub warehouse: String,
    pub product: String,
    /// "Stock" or "Sell", as entered in the sheet
    pub operation: String,
    pub quantity: i64,
    /// Buyer or seller name
    pub counterparty: String,
}

/// One income or expense journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub date: String,
    pub amount: f64,
    pub account: String,
    /// "Income" or "Expense", as entered in the sheet
    pub kind: String,
    pub description: String,
}

/// Any normalized record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizedRecord {
    Inventory(InventoryRecord),
    Transaction(TransactionRecord),
    Ledger(LedgerRecord),
}

impl NormalizedRecord {
    /// Data set the record was read from
    pub fn data_set(&self) -> DataSet {
        match self {
            Self::Inventory(_) => DataSet::Inventory,
            Self::Transaction(_) => DataSet::Transactions,
            Self::Ledger(_) => DataSet::Expenses,
        }
    }
}

/// Normalized records for every data set; sets that were not fetched stay empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedData {
    pub inventory: Vec<InventoryRecord>,
    pub transactions: Vec<TransactionRecord>,
    pub expenses: Vec<LedgerRecord>,
}

impl NormalizedData {
    /// Number of records held for a data set
    pub fn count(&self, data_set: DataSet) -> usize {
        match data_set {
            DataSet::Inventory => self.inventory.len(),
            DataSet::Transactions => self.transactions.len(),
            DataSet::Expenses => self.expenses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        DataSet::ALL.iter().all(|set| self.count(*set) == 0)
    }

    /// Append records, routing each to its data set
    pub fn extend(&mut self, records: impl IntoIterator<Item = NormalizedRecord>) {
        for record in records {
            match record {
                NormalizedRecord::Inventory(r) => self.inventory.push(r),
                NormalizedRecord::Transaction(r) => self.transactions.push(r),
                NormalizedRecord::Ledger(r) => self.expenses.push(r),
            }
        }
    }
}
