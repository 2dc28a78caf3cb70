//! Claude Backend
//!
//! Single-turn, non-streaming calls to the Anthropic Messages API. The
//! context bundle travels in the system prompt; the user turn is the
//! question verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use vyapar_config::{constants, LlmConfig};
use vyapar_core::{GenerateRequest, GenerateResponse, LanguageModel, TokenUsage};

use crate::LlmError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Resolve a short alias to a model id; unknown names pass through
pub fn resolve_model(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "haiku" | "haiku-3.5" => "claude-3-5-haiku-20241022".to_string(),
        "sonnet" | "sonnet-4" => "claude-sonnet-4-20250514".to_string(),
        "opus" | "opus-4.5" => "claude-opus-4-5-20251101".to_string(),
        _ => name.to_string(),
    }
}

/// Configuration for Claude backend
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    /// API key (from settings or ANTHROPIC_API_KEY)
    pub api_key: String,
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature (0.0 - 1.0)
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
    /// API endpoint (for testing or proxy)
    pub endpoint: String,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            model: constants::llm::DEFAULT_MODEL.to_string(),
            max_tokens: constants::llm::DEFAULT_MAX_TOKENS,
            temperature: constants::llm::DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(constants::llm::DEFAULT_TIMEOUT_SECS),
            endpoint: constants::endpoints::ANTHROPIC_API.to_string(),
        }
    }
}

impl ClaudeConfig {
    /// Create config with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Build from loaded settings; an empty key falls back to ANTHROPIC_API_KEY
    pub fn from_settings(settings: &LlmConfig) -> Self {
        let mut config = Self {
            model: resolve_model(&settings.model),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature.clamp(0.0, 1.0),
            timeout: Duration::from_secs(settings.timeout_secs),
            endpoint: settings.endpoint.clone(),
            ..Default::default()
        };
        if !settings.api_key.is_empty() {
            config.api_key = settings.api_key.clone();
        }
        config
    }

    /// Set model (alias or full id)
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = resolve_model(model);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Claude backend
pub struct ClaudeBackend {
    config: ClaudeConfig,
    client: Client,
}

impl ClaudeBackend {
    pub fn new(config: ClaudeConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "ANTHROPIC_API_KEY not set. Set it via environment or config.".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClaudeConfig {
        &self.config
    }

    fn build_request(&self, request: &GenerateRequest) -> ClaudeRequest {
        ClaudeRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            system: Some(request.system.clone()).filter(|s| !s.is_empty()),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: request.user.clone(),
            }],
            temperature: Some(self.config.temperature),
        }
    }

    /// Send one request and collect the text blocks
    pub async fn complete(&self, request: &GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let body = self.build_request(request);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.endpoint))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: ClaudeApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let parsed = parse_response(response)?;
        tracing::debug!(
            model = %parsed.model,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Claude response received"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl LanguageModel for ClaudeBackend {
    async fn generate(&self, request: GenerateRequest) -> vyapar_core::Result<GenerateResponse> {
        Ok(self.complete(&request).await?)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn parse_response(response: ClaudeApiResponse) -> Result<GenerateResponse, LlmError> {
    let text: String = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ClaudeContentBlock::Text { text } => Some(text),
            ClaudeContentBlock::Other => None,
        })
        .collect();

    if text.is_empty() {
        return Err(LlmError::InvalidResponse(format!(
            "no text content (stop_reason: {:?})",
            response.stop_reason
        )));
    }

    Ok(GenerateResponse {
        text,
        model: response.model,
        usage: TokenUsage {
            input_tokens: response.usage.input_tokens,
            output_tokens: response.usage.output_tokens,
        },
    })
}

// =============================================================================
// Claude API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: usize,
    messages: Vec<ClaudeMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClaudeContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiResponse {
    #[serde(default)]
    model: String,
    content: Vec<ClaudeContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: ClaudeUsage,
}

#[derive(Debug, Default, Deserialize)]
struct ClaudeUsage {
    input_tokens: usize,
    output_tokens: usize,
}
