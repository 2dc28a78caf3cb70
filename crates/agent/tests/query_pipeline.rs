//! Integration tests for the query pipeline and assistant facade
//!
//! These run the full classify -> route -> fetch -> normalize -> assemble
//! flow against fixture tables, then through a scripted language model.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use vyapar_agent::{AgentError, Assistant, BusinessAssistant, PipelineState, QueryPipeline};
use vyapar_config::BusinessProfile;
use vyapar_core::{
    raw_table, DataSet, Error, FailureBoundary, GenerateRequest, GenerateResponse,
    InventoryRecord, Language, LanguageModel, QueryIntent, Result, Timeframe, TokenUsage,
};
use vyapar_sheets::InMemoryStore;

fn fixture_store() -> Arc<InMemoryStore> {
    Arc::new(
        InMemoryStore::new()
            .with_table(
                DataSet::Inventory,
                raw_table([
                    vec!["Bucket Type", "Pallavi", "Tularam", "Total"],
                    vec!["TATA G", "12", "8", "20"],
                    vec!["BB", "5", "", ""],
                    vec!["", "1", "1", "2"],
                ]),
            )
            .with_table(
                DataSet::Transactions,
                raw_table([
                    vec!["Date", "Warehouse", "Bucket Type", "Stock/Sell", "No.", "Buyer/Seller"],
                    vec!["2-Jan-2025", "Pallavi", "TATA G", "Sell", "10", "Ramesh"],
                    vec!["3-Jan-2025", "Tularam", "BB", "Stock", "40", "Supplier"],
                ]),
            )
            .with_table(
                DataSet::Expenses,
                raw_table([
                    vec!["Date", "Amount", "Account", "Type", "Name", "Nicknames"],
                    vec!["2-Jan-2025", "₹5,000", "PMR", "Income", "Ramesh", ""],
                    vec!["4-Jan-2025", "1200.50", "Cash", "Expense", "Diesel", ""],
                ]),
            ),
    )
}

fn pipeline(store: Arc<InMemoryStore>) -> QueryPipeline {
    QueryPipeline::new(&BusinessProfile::default(), store)
}

/// Language model that records requests and replies with a fixed answer
#[derive(Default)]
struct ScriptedModel {
    requests: Mutex<Vec<GenerateRequest>>,
    fail: bool,
}

impl ScriptedModel {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.requests.lock().push(request);
        if self.fail {
            return Err(Error::language_model("upstream returned 529"));
        }
        Ok(GenerateResponse {
            text: "इस महीने 10 buckets बिके।".to_string(),
            model: "scripted".to_string(),
            usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 12,
            },
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn test_hindi_sales_question() {
    let store = fixture_store();
    let bundle = pipeline(store.clone())
        .process_query("इस महीने कितनी sales हुई?")
        .await
        .unwrap();

    assert_eq!(bundle.language(), Language::Hindi);
    assert_eq!(bundle.intent(), QueryIntent::SalesInquiry);
    assert!(bundle.query.context.timeframe.contains(&Timeframe::Month));
    assert!(!bundle.fallback_mode);

    let mut reads = store.reads();
    reads.sort();
    assert_eq!(reads, vec![DataSet::Transactions, DataSet::Expenses]);
    assert_eq!(bundle.summary().inventory_items, 0);
    assert_eq!(bundle.summary().transactions, 2);
    assert_eq!(bundle.summary().expenses, 2);
}

#[tokio::test]
async fn test_english_stock_question() {
    let store = fixture_store();
    let bundle = pipeline(store.clone())
        .process_query("current stock status")
        .await
        .unwrap();

    assert_eq!(bundle.language(), Language::English);
    assert_eq!(bundle.intent(), QueryIntent::InventoryCheck);

    let mut reads = store.reads();
    reads.sort();
    assert_eq!(reads, vec![DataSet::Inventory, DataSet::Transactions]);
    assert!(bundle.data.expenses.is_empty());
}

#[tokio::test]
async fn test_account_entity() {
    let bundle = pipeline(fixture_store())
        .process_query("PMR account में कितना पैसा है?")
        .await
        .unwrap();

    assert_eq!(bundle.language(), Language::Hindi);
    assert!(bundle.query.context.entities.accounts.contains(&"PMR".to_string()));
}

#[tokio::test]
async fn test_fallback_on_fetch_failure() {
    let store = fixture_store();
    store.fail_next_reads(1);

    let (bundle, trace) = pipeline(store.clone())
        .process_query_traced("इस महीने कितनी sales हुई?")
        .await
        .unwrap();

    assert!(bundle.fallback_mode);
    assert_eq!(bundle.intent(), QueryIntent::GeneralInquiry);
    assert_eq!(bundle.language(), Language::English);
    assert_eq!(bundle.query.original, "इस महीने कितनी sales हुई?");
    assert_eq!(bundle.summary().inventory_items, 2);
    assert_eq!(bundle.summary().transactions, 2);
    assert_eq!(bundle.summary().expenses, 2);

    assert!(trace.used_fallback());
    assert_eq!(trace.last_state(), PipelineState::Done);
    assert!(trace
        .primary_error
        .as_deref()
        .is_some_and(|e| e.contains("injected failure")));
}

#[tokio::test]
async fn test_fallback_failure_is_terminal() {
    let store = fixture_store();
    store.make_unavailable(DataSet::Transactions);

    let result = pipeline(store).process_query("current stock status").await;
    match result {
        Err(err @ AgentError::FallbackFailed { .. }) => {
            assert_eq!(err.boundary(), FailureBoundary::DataAccess);
        }
        other => panic!("expected FallbackFailed, got {:?}", other.map(|b| b.intent())),
    }
}

#[tokio::test]
async fn test_inventory_normalization() {
    let (bundle, trace) = pipeline(fixture_store())
        .process_query_traced("stock kitna hai")
        .await
        .unwrap();

    assert_eq!(
        bundle.data.inventory[0],
        InventoryRecord {
            product: "TATA G".to_string(),
            warehouse_a_qty: 12,
            warehouse_b_qty: 8,
            total: 20,
        }
    );
    // Missing total is derived from the warehouse quantities
    assert_eq!(bundle.data.inventory[1].total, 5);
    // Row without a product is dropped
    assert_eq!(bundle.data.inventory.len(), 2);
    assert_eq!(trace.rows_dropped, 1);
    assert!(bundle.counts_consistent());
}

#[tokio::test]
async fn test_blank_question_reads_nothing() {
    let store = fixture_store();
    let result = pipeline(store.clone()).process_query(" \n\t ").await;

    let err = result.unwrap_err();
    assert!(matches!(err, AgentError::EmptyInput));
    assert_eq!(err.boundary(), FailureBoundary::UserInput);
    assert!(store.reads().is_empty());
}

#[tokio::test]
async fn test_concurrent_requests_share_pipeline() {
    let pipeline = Arc::new(pipeline(fixture_store()));
    let questions = [
        "इस महीने कितनी sales हुई?",
        "current stock status",
        "PMR account में कितना पैसा है?",
        "आज का हिसाब",
    ];

    let handles: Vec<_> = questions
        .iter()
        .map(|q| {
            let pipeline = Arc::clone(&pipeline);
            let q = q.to_string();
            tokio::spawn(async move { pipeline.process_query(&q).await })
        })
        .collect();

    for (handle, question) in handles.into_iter().zip(questions) {
        let bundle = handle.await.unwrap().unwrap();
        assert_eq!(bundle.query.original, question);
        assert!(bundle.counts_consistent());
    }
}

#[tokio::test]
async fn test_assistant_prompt_and_reply() {
    let model = Arc::new(ScriptedModel::default());
    let assistant = BusinessAssistant::new(pipeline(fixture_store()), model.clone());

    let reply = assistant.ask("इस महीने कितनी sales हुई?").await.unwrap();
    assert_eq!(reply.answer, "इस महीने 10 buckets बिके।");
    assert_eq!(reply.metadata.language, Language::Hindi);
    assert_eq!(reply.metadata.analysis_kind, "sales_analysis");
    assert_eq!(reply.metadata.data_used.transactions, 2);
    assert_eq!(reply.metadata.data_used.inventory, 0);
    assert!(!reply.metadata.fallback_mode);

    let requests = model.requests.lock();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.user, "इस महीने कितनी sales हुई?");
    assert!(request.system.contains("Hindi"));
    assert!(request.system.contains('₹'));
    assert!(request.system.contains("इस महीने कितनी sales हुई?"));
}

#[tokio::test]
async fn test_assistant_model_failure() {
    let assistant =
        BusinessAssistant::new(pipeline(fixture_store()), Arc::new(ScriptedModel::failing()));

    let err = Assistant::ask(&assistant, "current stock status")
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Model(_)));
    assert_eq!(err.boundary(), FailureBoundary::AssistantService);
}
