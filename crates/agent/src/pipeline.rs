//! Query pipeline
//!
//! One sequential pass per question:
//!
//! ```text
//! Start -> Classified -> Routed -> Fetched -> Normalized -> Assembled -> Done
//!                           \________ Failed -> (full fetch) -> Fetched -> ... -> Done
//! ```
//!
//! Classification and normalization cannot fail. A data store error moves
//! the request to `Failed`, which runs exactly one fallback: read all three
//! data sets and build a bundle tagged `fallback_mode` with the default
//! classification (general inquiry, English). If that read fails too the
//! caller gets [`AgentError::FallbackFailed`].

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;
use vyapar_config::BusinessProfile;
use vyapar_core::{
    ContextBundle, DataSet, DataStore, NormalizedData, QueryContext, QueryIntent, RawQuery,
    TableSet,
};
use vyapar_text_processing::QueryAnalyzer;

use crate::context::ContextAssembler;
use crate::{normalizer, router, AgentError};

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Start,
    Classified,
    Routed,
    Fetched,
    Normalized,
    Assembled,
    Done,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Classified => "classified",
            Self::Routed => "routed",
            Self::Fetched => "fetched",
            Self::Normalized => "normalized",
            Self::Assembled => "assembled",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// What happened while answering one question
#[derive(Debug, Clone, Serialize)]
pub struct PipelineTrace {
    pub request_id: Uuid,
    /// States visited, in order
    pub states: Vec<PipelineState>,
    /// Data sets requested by the targeted path
    pub route: Vec<DataSet>,
    /// Runner-up intents from classification
    pub alternatives: Vec<(QueryIntent, f32)>,
    pub rows_dropped: usize,
    /// Error that sent the request down the fallback path
    pub primary_error: Option<String>,
    pub elapsed_ms: u64,
}

impl PipelineTrace {
    fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            states: vec![PipelineState::Start],
            route: Vec::new(),
            alternatives: Vec::new(),
            rows_dropped: 0,
            primary_error: None,
            elapsed_ms: 0,
        }
    }

    fn enter(&mut self, state: PipelineState) {
        tracing::debug!(request_id = %self.request_id, state = state.as_str(), "Pipeline transition");
        self.states.push(state);
    }

    pub fn used_fallback(&self) -> bool {
        self.states.contains(&PipelineState::Failed)
    }

    pub fn last_state(&self) -> PipelineState {
        self.states.last().copied().unwrap_or(PipelineState::Start)
    }
}

/// Query pipeline
///
/// Stateless across requests; share it by `Arc` between tasks.
pub struct QueryPipeline {
    analyzer: QueryAnalyzer,
    assembler: ContextAssembler,
    store: Arc<dyn DataStore>,
}

impl QueryPipeline {
    pub fn new(profile: &BusinessProfile, store: Arc<dyn DataStore>) -> Self {
        Self {
            analyzer: QueryAnalyzer::new(profile),
            assembler: ContextAssembler::new(profile.business_facts()),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn DataStore> {
        &self.store
    }

    /// Answer-ready context for one question
    pub async fn process_query(&self, text: &str) -> Result<ContextBundle, AgentError> {
        self.process_query_traced(text)
            .await
            .map(|(bundle, _)| bundle)
    }

    /// Like [`process_query`](Self::process_query), also returning the state trace
    pub async fn process_query_traced(
        &self,
        text: &str,
    ) -> Result<(ContextBundle, PipelineTrace), AgentError> {
        let query = RawQuery::new(text).map_err(|_| AgentError::EmptyInput)?;
        let start = Instant::now();
        let mut trace = PipelineTrace::new(query.request_id);

        metrics::counter!("vyapar_queries_total").increment(1);

        let result = match self.run_targeted(&query, &mut trace).await {
            Ok(bundle) => Ok(bundle),
            Err(primary) => {
                trace.enter(PipelineState::Failed);
                tracing::warn!(
                    request_id = %query.request_id,
                    store = self.store.name(),
                    error = %primary,
                    "Targeted fetch failed, falling back to full read"
                );
                metrics::counter!("vyapar_fallback_total").increment(1);
                trace.primary_error = Some(primary.to_string());
                self.run_fallback(&query, primary, &mut trace).await
            }
        };

        trace.elapsed_ms = start.elapsed().as_millis() as u64;
        if trace.rows_dropped > 0 {
            metrics::counter!("vyapar_rows_dropped_total").increment(trace.rows_dropped as u64);
        }

        let bundle = result?;
        trace.enter(PipelineState::Done);

        tracing::info!(
            request_id = %query.request_id,
            intent = %bundle.intent(),
            language = %bundle.language(),
            fallback = bundle.fallback_mode,
            inventory = bundle.summary().inventory_items,
            transactions = bundle.summary().transactions,
            expenses = bundle.summary().expenses,
            elapsed_ms = trace.elapsed_ms,
            "Query processed"
        );

        Ok((bundle, trace))
    }

    async fn run_targeted(
        &self,
        query: &RawQuery,
        trace: &mut PipelineTrace,
    ) -> vyapar_core::Result<ContextBundle> {
        let analyzed = self.analyzer.analyze_detailed(query);
        trace.alternatives = analyzed.classification.alternatives.clone();
        trace.enter(PipelineState::Classified);

        let route = router::route(analyzed.context.intent);
        trace.route = route.to_vec();
        trace.enter(PipelineState::Routed);

        let tables = self.store.batch_read(route).await?;
        trace.enter(PipelineState::Fetched);

        let data = Self::normalize_tables(route, &tables, trace);
        trace.enter(PipelineState::Normalized);

        let bundle = self.assembler.assemble(&query.text, analyzed.context, data, false);
        trace.enter(PipelineState::Assembled);

        Ok(bundle)
    }

    async fn run_fallback(
        &self,
        query: &RawQuery,
        primary: vyapar_core::Error,
        trace: &mut PipelineTrace,
    ) -> Result<ContextBundle, AgentError> {
        let tables = match self.store.batch_read(&DataSet::ALL).await {
            Ok(tables) => tables,
            Err(fallback) => {
                tracing::error!(
                    request_id = %query.request_id,
                    primary = %primary,
                    fallback = %fallback,
                    "Fallback fetch failed"
                );
                return Err(AgentError::FallbackFailed {
                    primary: primary.to_string(),
                    fallback: fallback.to_string(),
                });
            }
        };
        trace.enter(PipelineState::Fetched);

        let data = Self::normalize_tables(&DataSet::ALL, &tables, trace);
        trace.enter(PipelineState::Normalized);

        let bundle = self
            .assembler
            .assemble(&query.text, QueryContext::fallback(), data, true);
        trace.enter(PipelineState::Assembled);

        Ok(bundle)
    }

    /// Normalize the requested tables; a set missing from `tables` stays empty
    fn normalize_tables(
        data_sets: &[DataSet],
        tables: &TableSet,
        trace: &mut PipelineTrace,
    ) -> NormalizedData {
        let mut data = NormalizedData::default();
        for data_set in data_sets {
            let Some(table) = tables.get(data_set) else {
                tracing::debug!(%data_set, "Data set missing from store response");
                continue;
            };
            let normalized = normalizer::normalize(*data_set, table);
            trace.rows_dropped += normalized.dropped;
            data.extend(normalized.records);
        }
        data
    }
}
