//! Generative model collaborator

use async_trait::async_trait;

use crate::llm_types::{GenerateRequest, GenerateResponse};
use crate::Result;

/// Text-in/text-out language model
///
/// # Example
///
/// ```ignore
/// let model: Arc<dyn LanguageModel> = Arc::new(ClaudeBackend::new(config)?);
/// let reply = model.generate(GenerateRequest::new(prompt, question)).await?;
/// println!("{}", reply.text);
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate one answer
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
