//! Prompt Building
//!
//! Renders a [`ContextBundle`] into the instruction template sent as the
//! system prompt:
//!
//! 1. Role preamble describing the sheets and response rules
//! 2. `## CURRENT BUSINESS DATA ANALYSIS:` with the bundle as pretty JSON
//! 3. `## KEY INSTRUCTIONS FOR YOUR RESPONSE:` numbered rules
//! 4. `## USER'S QUESTION: "<text>"`


use vyapar_core::{BusinessFacts, ContextBundle, GenerateRequest};

use crate::LlmError;

/// Builds model requests from context bundles
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    /// Replaces the generated preamble when set
    preamble: Option<String>,
    max_tokens: Option<usize>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed role preamble instead of the one built from business facts
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Full system prompt for one question
    pub fn system_prompt(&self, bundle: &ContextBundle) -> Result<String, LlmError> {
        let data = serde_json::to_string_pretty(bundle)
            .map_err(|e| LlmError::Generation(format!("bundle serialization: {}", e)))?;

        let preamble = match &self.preamble {
            Some(p) => p.clone(),
            None => role_preamble(&bundle.business_context),
        };

        let language = bundle.instructions.response_language.name();
        let symbol = &bundle.instructions.format_currency;
        let currency = &bundle.business_context.currency;

        let mut prompt = String::with_capacity(preamble.len() + data.len() + 1024);
        prompt.push_str(&preamble);
        prompt.push_str("\n\n## CURRENT BUSINESS DATA ANALYSIS:\n");
        prompt.push_str(&data);
        prompt.push_str("\n\n## KEY INSTRUCTIONS FOR YOUR RESPONSE:\n");
        let rules = [
            format!("**Language**: Respond in {}", language),
            "**Data Analysis**: Use the REAL data provided above to answer the question".to_string(),
            "**Specific Numbers**: Include actual figures from the data".to_string(),
            "**Business Insights**: Provide actionable recommendations".to_string(),
            format!("**Currency**: Format amounts in {} ({})", currency, symbol),
            "**Professional**: Be helpful but concise".to_string(),
        ];
        for (i, rule) in rules.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, rule));
        }
        prompt.push_str(&format!(
            "\n## USER'S QUESTION: \"{}\"\n\n",
            bundle.query.original
        ));
        prompt.push_str(
            "Analyze the data and provide a data-driven response that helps make informed business decisions.",
        );

        Ok(prompt)
    }

    /// Request with the rendered template as system prompt and the question as user turn
    pub fn build(&self, bundle: &ContextBundle) -> Result<GenerateRequest, LlmError> {
        let system = self.system_prompt(bundle)?;
        let request = GenerateRequest::new(system, bundle.query.original.clone());
        Ok(match self.max_tokens {
            Some(max) => request.with_max_tokens(max),
            None => request,
        })
    }
}

/// Role preamble built from the business facts
pub fn role_preamble(facts: &BusinessFacts) -> String {
    let list = |items: &[String]| items.join(", ");
    format!(
        r#"You are a specialized Business Intelligence Assistant for a {company} in India. You analyze data from two spreadsheets:

## DATA SOURCES:
### Sheet 1: "Expense_Income_Journal"
- Financial transactions with columns: Date, Amount, Account, Type (Income/Expense), Name, Nicknames (ignore)
- Accounts: {accounts}

### Sheet 2: "Buckets"
- Inventory Summary: product, stock per warehouse, total
- Transaction Log: Date, Warehouse, Product, Stock/Sell, Quantity, Buyer/Seller
- Products: {products}
- Warehouses: {warehouses}

## RESPONSE RULES:
1. Respond in the same language as the question (Hindi/Marathi/English)
2. Use fuzzy matching for person/customer names
3. Provide specific numbers with currency formatting ({symbol})
4. Include actionable insights and follow-up suggestions
5. Handle relative dates (आज, कल, इस महीने, etc.)"#,
        company = facts.company,
        accounts = list(&facts.accounts),
        products = list(&facts.products),
        warehouses = list(&facts.warehouses),
        symbol = facts.currency_symbol,
    )
}
