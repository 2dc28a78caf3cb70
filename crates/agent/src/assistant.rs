//! Assistant facade
//!
//! Validates the question, runs the query pipeline, renders the prompt and
//! asks the generative model. The reply carries metadata about which data
//! was used and whether the fallback path ran.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vyapar_config::{BusinessProfile, Settings};
use vyapar_core::{DataStore, Language, LanguageModel};
use vyapar_llm::{ClaudeBackend, ClaudeConfig, PromptBuilder};
use vyapar_sheets::SheetsClient;

use crate::pipeline::QueryPipeline;
use crate::traits::Assistant;
use crate::AgentError;

/// Record counts the answer was based on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataUsed {
    pub inventory: usize,
    pub transactions: usize,
    pub expenses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMetadata {
    pub processing_time_ms: u64,
    /// e.g. `sales_analysis`
    pub analysis_kind: String,
    pub language: Language,
    pub data_used: DataUsed,
    pub fallback_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub answer: String,
    pub metadata: ReplyMetadata,
}

/// Business assistant
pub struct BusinessAssistant {
    pipeline: QueryPipeline,
    model: Arc<dyn LanguageModel>,
    prompts: PromptBuilder,
}

impl BusinessAssistant {
    pub fn new(pipeline: QueryPipeline, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            pipeline,
            model,
            prompts: PromptBuilder::new(),
        }
    }

    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Wire the Sheets store and Claude backend from settings
    ///
    /// Loads the business profile from `business_profile_path` when set,
    /// otherwise uses the built-in profile.
    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let profile = match &settings.business_profile_path {
            Some(path) => BusinessProfile::load(path)?,
            None => BusinessProfile::default(),
        };

        let store: Arc<dyn DataStore> = Arc::new(SheetsClient::new(
            settings.sheets.clone(),
            profile.sheets.clone(),
        )?);
        let model: Arc<dyn LanguageModel> =
            Arc::new(ClaudeBackend::new(ClaudeConfig::from_settings(&settings.llm))?);

        tracing::info!(
            store = store.name(),
            model = model.model_name(),
            company = %profile.company,
            "Business assistant initialized"
        );

        Ok(Self::new(QueryPipeline::new(&profile, store), model)
            .with_prompt_builder(PromptBuilder::new().with_max_tokens(settings.llm.max_tokens)))
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    /// Answer one question
    pub async fn ask(&self, question: &str) -> Result<AssistantReply, AgentError> {
        let start = Instant::now();

        let bundle = self.pipeline.process_query(question).await?;
        let request = self.prompts.build(&bundle)?;

        let response = self.model.generate(request).await.map_err(|e| {
            tracing::error!(model = self.model.model_name(), error = %e, "Model call failed");
            AgentError::Model(e.to_string())
        })?;

        let summary = bundle.summary();
        let metadata = ReplyMetadata {
            processing_time_ms: start.elapsed().as_millis() as u64,
            analysis_kind: bundle.analysis.kind().to_string(),
            language: bundle.language(),
            data_used: DataUsed {
                inventory: summary.inventory_items,
                transactions: summary.transactions,
                expenses: summary.expenses,
            },
            fallback_mode: bundle.fallback_mode,
        };

        tracing::info!(
            model = %response.model,
            output_tokens = response.usage.output_tokens,
            processing_time_ms = metadata.processing_time_ms,
            "Answer generated"
        );

        Ok(AssistantReply {
            answer: response.text,
            metadata,
        })
    }
}

#[async_trait]
impl Assistant for BusinessAssistant {
    async fn ask(&self, question: &str) -> Result<AssistantReply, AgentError> {
        BusinessAssistant::ask(self, question).await
    }

    fn model_name(&self) -> &str {
        self.model.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_requires_spreadsheet_id() {
        let mut settings = Settings::default();
        settings.llm.api_key = "sk-ant-test".into();
        let result = BusinessAssistant::from_settings(&settings);
        assert!(matches!(result, Err(AgentError::Configuration(_))));
    }

    #[test]
    fn test_from_settings_wires_collaborators() {
        let mut settings = Settings::default();
        settings.sheets.spreadsheet_id = "sheet-123".into();
        settings.sheets.access_token = "token".into();
        settings.llm.api_key = "sk-ant-test".into();
        settings.llm.model = "sonnet".into();

        let assistant = BusinessAssistant::from_settings(&settings).unwrap();
        assert_eq!(Assistant::model_name(&assistant), "claude-sonnet-4-20250514");
        assert_eq!(assistant.pipeline().store().name(), "google_sheets");
    }

    #[test]
    fn test_reply_serialization() {
        let reply = AssistantReply {
            answer: "₹5,000".into(),
            metadata: ReplyMetadata {
                processing_time_ms: 12,
                analysis_kind: "financial_analysis".into(),
                language: Language::Hindi,
                data_used: DataUsed {
                    inventory: 0,
                    transactions: 1,
                    expenses: 1,
                },
                fallback_mode: false,
            },
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["metadata"]["language"], "hindi");
        assert_eq!(json["metadata"]["data_used"]["expenses"], 1);
    }
}
