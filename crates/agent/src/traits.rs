//! Assistant trait for abstraction and testability
//!
//! Callers (an HTTP handler, a chat bot, a CLI) depend on this trait rather
//! than on [`BusinessAssistant`](crate::BusinessAssistant), so they can be
//! tested with a scripted implementation.

use async_trait::async_trait;

use crate::assistant::AssistantReply;
use crate::AgentError;

/// Question-answering assistant
///
/// # Example
///
/// ```ignore
/// struct CannedAssistant;
///
/// #[async_trait]
/// impl Assistant for CannedAssistant {
///     async fn ask(&self, question: &str) -> Result<AssistantReply, AgentError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Answer one question
    ///
    /// Blank questions are rejected with [`AgentError::EmptyInput`] before
    /// any data is read. Errors carry a [`boundary`](AgentError::boundary)
    /// so the caller can render a message for data-access or
    /// assistant-service failures.
    async fn ask(&self, question: &str) -> Result<AssistantReply, AgentError>;

    /// Model identifier answering the questions
    fn model_name(&self) -> &str;
}
