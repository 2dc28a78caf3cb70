//! Sheet ranges for each data set

use serde::{Deserialize, Serialize};
use vyapar_core::DataSet;

use crate::constants::ranges;

/// A1-notation range per data set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRanges {
    #[serde(default = "default_inventory")]
    pub inventory: String,
    #[serde(default = "default_transactions")]
    pub transactions: String,
    #[serde(default = "default_expenses")]
    pub expenses: String,
}

fn default_inventory() -> String {
    ranges::INVENTORY.to_string()
}

fn default_transactions() -> String {
    ranges::TRANSACTIONS.to_string()
}

fn default_expenses() -> String {
    ranges::EXPENSES.to_string()
}

impl Default for SheetRanges {
    fn default() -> Self {
        Self {
            inventory: default_inventory(),
            transactions: default_transactions(),
            expenses: default_expenses(),
        }
    }
}

impl SheetRanges {
    pub fn range(&self, data_set: DataSet) -> &str {
        match data_set {
            DataSet::Inventory => &self.inventory,
            DataSet::Transactions => &self.transactions,
            DataSet::Expenses => &self.expenses,
        }
    }

    /// Inverse of [`range`](Self::range)
    pub fn data_set_for(&self, range: &str) -> Option<DataSet> {
        DataSet::ALL.into_iter().find(|ds| self.range(*ds) == range)
    }

    pub fn validate(&self) -> Result<(), String> {
        for data_set in DataSet::ALL {
            let range = self.range(data_set);
            if range.trim().is_empty() {
                return Err(format!("range for {} is empty", data_set));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let ranges = SheetRanges::default();
        assert_eq!(ranges.range(DataSet::Inventory), "Buckets!A5:D14");
        assert_eq!(ranges.range(DataSet::Transactions), "Buckets!A17:F");
        assert_eq!(ranges.range(DataSet::Expenses), "Expense_Income_Journal!A:F");
        assert_eq!(ranges.data_set_for("Buckets!A17:F"), Some(DataSet::Transactions));
        assert_eq!(ranges.data_set_for("Other!A:A"), None);
    }

    #[test]
    fn test_empty_range_rejected() {
        let ranges = SheetRanges {
            expenses: "  ".into(),
            ..Default::default()
        };
        assert!(ranges.validate().is_err());
    }
}
