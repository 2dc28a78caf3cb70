//! Context bundle handed to the generative model
//!
//! The bundle is an owned snapshot: classification, normalized records,
//! static business facts, and instruction hints. It is built once per
//! request and serialized into the model prompt.

use serde::{Deserialize, Serialize};

use crate::{
    DataSet, InventoryRecord, Language, LedgerRecord, NormalizedData, QueryContext, QueryIntent,
    Timeframe, TransactionRecord,
};

/// Static facts about the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessFacts {
    pub company: String,
    pub products: Vec<String>,
    pub warehouses: Vec<String>,
    pub accounts: Vec<String>,
    /// ISO currency code, e.g. INR
    pub currency: String,
    /// Display glyph, e.g. ₹
    pub currency_symbol: String,
}

/// Hints for the downstream text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionFlags {
    pub response_language: Language,
    pub include_specific_numbers: bool,
    pub provide_insights: bool,
    pub format_currency: String,
    pub be_actionable: bool,
}

impl InstructionFlags {
    pub fn new(response_language: Language, currency_symbol: impl Into<String>) -> Self {
        Self {
            response_language,
            include_specific_numbers: true,
            provide_insights: true,
            format_currency: currency_symbol.into(),
            be_actionable: true,
        }
    }
}

/// Record counts per data set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSummary {
    pub inventory_items: usize,
    pub transactions: usize,
    pub expenses: usize,
}

impl DataSummary {
    /// Counts taken from the normalized arrays themselves
    pub fn of(data: &NormalizedData) -> Self {
        Self {
            inventory_items: data.count(DataSet::Inventory),
            transactions: data.count(DataSet::Transactions),
            expenses: data.count(DataSet::Expenses),
        }
    }

    pub fn total(&self) -> usize {
        self.inventory_items + self.transactions + self.expenses
    }
}

/// Query section of the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleQuery {
    /// Question text, verbatim
    pub original: String,
    #[serde(flatten)]
    pub context: QueryContext,
}

/// Data section of the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleData {
    pub summary: DataSummary,
    pub inventory: Vec<InventoryRecord>,
    pub transactions: Vec<TransactionRecord>,
    pub expenses: Vec<LedgerRecord>,
}

impl BundleData {
    /// Wrap normalized records, deriving the summary from them
    pub fn from_normalized(data: NormalizedData) -> Self {
        let summary = DataSummary::of(&data);
        Self {
            summary,
            inventory: data.inventory,
            transactions: data.transactions,
            expenses: data.expenses,
        }
    }
}

/// Which kind of analysis the question calls for
///
/// Each variant has a fixed field set; only the data sets relevant to the
/// variant are counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Analysis {
    Sales {
        transaction_count: usize,
        expense_count: usize,
        timeframe: Option<Timeframe>,
    },
    Inventory {
        inventory_count: usize,
        transaction_count: usize,
        timeframe: Option<Timeframe>,
    },
    Customer {
        transaction_count: usize,
        timeframe: Option<Timeframe>,
    },
    Financial {
        expense_count: usize,
        transaction_count: usize,
        timeframe: Option<Timeframe>,
    },
    Comprehensive {
        inventory_count: usize,
        transaction_count: usize,
        expense_count: usize,
    },
}

impl Analysis {
    /// Select the analysis variant for an intent
    ///
    /// `timeframe` is the first extracted timeframe, if any.
    pub fn for_intent(intent: QueryIntent, summary: &DataSummary, timeframe: Option<Timeframe>) -> Self {
        match intent {
            QueryIntent::SalesInquiry => Self::Sales {
                transaction_count: summary.transactions,
                expense_count: summary.expenses,
                timeframe,
            },
            QueryIntent::InventoryCheck => Self::Inventory {
                inventory_count: summary.inventory_items,
                transaction_count: summary.transactions,
                timeframe,
            },
            QueryIntent::CustomerAnalysis => Self::Customer {
                transaction_count: summary.transactions,
                timeframe,
            },
            QueryIntent::FinancialAnalysis => Self::Financial {
                expense_count: summary.expenses,
                transaction_count: summary.transactions,
                timeframe,
            },
            QueryIntent::StatusCheck | QueryIntent::GeneralInquiry => Self::Comprehensive {
                inventory_count: summary.inventory_items,
                transaction_count: summary.transactions,
                expense_count: summary.expenses,
            },
        }
    }

    /// Short label, e.g. `sales_analysis`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sales { .. } => "sales_analysis",
            Self::Inventory { .. } => "inventory_analysis",
            Self::Customer { .. } => "customer_analysis",
            Self::Financial { .. } => "financial_analysis",
            Self::Comprehensive { .. } => "comprehensive_analysis",
        }
    }
}

/// Everything the generative model needs to answer one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    pub query: BundleQuery,
    pub analysis: Analysis,
    pub data: BundleData,
    pub business_context: BusinessFacts,
    pub instructions: InstructionFlags,
    #[serde(rename = "fallbackMode")]
    pub fallback_mode: bool,
}

impl ContextBundle {
    pub fn summary(&self) -> &DataSummary {
        &self.data.summary
    }

    pub fn language(&self) -> Language {
        self.query.context.language
    }

    pub fn intent(&self) -> QueryIntent {
        self.query.context.intent
    }

    /// Check the summary-count invariant
    pub fn counts_consistent(&self) -> bool {
        self.data.summary.inventory_items == self.data.inventory.len()
            && self.data.summary.transactions == self.data.transactions.len()
            && self.data.summary.expenses == self.data.expenses.len()
    }
}
