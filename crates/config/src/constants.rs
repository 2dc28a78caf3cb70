//! Centralized constants for the business query assistant
//!
//! Single source of truth for default values. Anything here can be
//! overridden through `Settings` or a business profile YAML.

/// Spreadsheet ranges bound to each data set
pub mod ranges {
    /// Inventory summary: product, Pallavi, Tularam, total
    pub const INVENTORY: &str = "Buckets!A5:D14";

    /// Transaction log: date, warehouse, product, Stock/Sell, quantity, buyer/seller
    pub const TRANSACTIONS: &str = "Buckets!A17:F";

    /// Income/expense journal: date, amount, account, type, name, nicknames
    pub const EXPENSES: &str = "Expense_Income_Journal!A:F";
}

/// External service endpoints
pub mod endpoints {
    /// Google Sheets REST API
    pub const SHEETS_API: &str = "https://sheets.googleapis.com";

    /// Anthropic Messages API
    pub const ANTHROPIC_API: &str = "https://api.anthropic.com";
}

/// Intent classification
pub mod classification {
    /// Scores below this fall back to general_inquiry
    pub const MIN_INTENT_SCORE: f32 = 0.1;
}

/// Generative model defaults
pub mod llm {
    pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
    pub const DEFAULT_MAX_TOKENS: usize = 2000;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Data store defaults
pub mod sheets {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
}

/// Currency formatting
pub mod currency {
    pub const CODE: &str = "INR";
    pub const SYMBOL: &str = "₹";
}
