//! Row normalization
//!
//! Turns positional sheet rows into typed records. The first row of every
//! table is a header and is discarded. Numeric cells are parsed leniently;
//! a row that cannot be mapped is dropped and reported, never fatal.
//!
//! Column layouts:
//! - inventory: `[product, warehouse A qty, warehouse B qty, total]`
//! - transactions: `[date, warehouse, product, Stock/Sell, quantity, buyer/seller]`
//! - expenses: `[date, amount, account, Income/Expense, description, nicknames]`

use thiserror::Error;
use vyapar_core::{
    DataSet, InventoryRecord, LedgerRecord, NormalizedRecord, RawTable, TransactionRecord,
};

/// Why a single row was dropped
#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum NormalizeError {
    #[error("{data_set} row {row}: {reason}")]
    MalformedRow {
        data_set: DataSet,
        /// Row index in the raw table (header is 0)
        row: usize,
        reason: String,
    },
}

/// Records from one table plus the number of rows dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub records: Vec<NormalizedRecord>,
    pub dropped: usize,
}

/// Minimum populated columns per data set
fn min_columns(data_set: DataSet) -> usize {
    match data_set {
        DataSet::Inventory => 1,
        DataSet::Transactions => 3,
        DataSet::Expenses => 2,
    }
}

/// Normalize one raw table. Never fails; output has at most `table.len() - 1` records.
pub fn normalize(data_set: DataSet, table: &RawTable) -> Normalized {
    let mut out = Normalized::default();

    for (index, row) in table.iter().enumerate().skip(1) {
        match normalize_row(data_set, index, row) {
            Ok(record) => out.records.push(record),
            Err(err) => {
                out.dropped += 1;
                if row.iter().all(|cell| cell.trim().is_empty()) {
                    tracing::debug!(%data_set, row = index, "Skipping blank row");
                } else {
                    tracing::warn!(error = %err, "Dropping malformed row");
                }
            }
        }
    }

    out
}

fn normalize_row(
    data_set: DataSet,
    index: usize,
    row: &[String],
) -> Result<NormalizedRecord, NormalizeError> {
    let malformed = |reason: String| NormalizeError::MalformedRow {
        data_set,
        row: index,
        reason,
    };

    let needed = min_columns(data_set);
    if row.len() < needed {
        return Err(malformed(format!(
            "{} columns, need at least {}",
            row.len(),
            needed
        )));
    }

    // Identifying field: product for inventory, date otherwise
    let key = cell(row, 0);
    if key.is_empty() {
        let field = if data_set == DataSet::Inventory { "product" } else { "date" };
        return Err(malformed(format!("{} is blank", field)));
    }

    let record = match data_set {
        DataSet::Inventory => {
            let warehouse_a_qty = parse_int(cell(row, 1));
            let warehouse_b_qty = parse_int(cell(row, 2));
            let total = parse_number(cell(row, 3))
                .map(truncate)
                .unwrap_or(warehouse_a_qty.saturating_add(warehouse_b_qty));
            NormalizedRecord::Inventory(InventoryRecord {
                product: key.to_string(),
                warehouse_a_qty,
                warehouse_b_qty,
                total,
            })
        }
        DataSet::Transactions => NormalizedRecord::Transaction(TransactionRecord {
            date: key.to_string(),
            warehouse: cell(row, 1).to_string(),
            product: cell(row, 2).to_string(),
            operation: cell(row, 3).to_string(),
            quantity: parse_int(cell(row, 4)),
            counterparty: cell(row, 5).to_string(),
        }),
        DataSet::Expenses => NormalizedRecord::Ledger(LedgerRecord {
            date: key.to_string(),
            amount: parse_number(cell(row, 1)).unwrap_or(0.0),
            account: cell(row, 2).to_string(),
            kind: cell(row, 3).to_string(),
            description: cell(row, 4).to_string(),
        }),
    };

    Ok(record)
}

/// Trimmed cell, empty when the column is missing
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|c| c.trim()).unwrap_or("")
}

/// Lenient number: strips whitespace, `₹` and `,`
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '₹' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Integer cell; decimals truncate toward zero, anything else is 0
fn parse_int(raw: &str) -> i64 {
    parse_number(raw).map(truncate).unwrap_or(0)
}
