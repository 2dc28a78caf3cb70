//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{endpoints, llm, sheets};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation, warnings only
    #[default]
    Development,
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Spreadsheet access
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Generative model access
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Business profile YAML; built-in profile when unset
    #[serde(default)]
    pub business_profile_path: Option<String>,
}

/// Spreadsheet API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: String,

    /// OAuth bearer token with read scope
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_sheets_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_sheets_timeout")]
    pub timeout_secs: u64,
}

fn default_sheets_endpoint() -> String {
    endpoints::SHEETS_API.to_string()
}

fn default_sheets_timeout() -> u64 {
    sheets::DEFAULT_TIMEOUT_SECS
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            access_token: String::new(),
            endpoint: default_sheets_endpoint(),
            timeout_secs: default_sheets_timeout(),
        }
    }
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    llm::DEFAULT_MODEL.to_string()
}

fn default_llm_endpoint() -> String {
    endpoints::ANTHROPIC_API.to_string()
}

fn default_max_tokens() -> usize {
    llm::DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    llm::DEFAULT_TEMPERATURE
}

fn default_llm_timeout() -> u64 {
    llm::DEFAULT_TIMEOUT_SECS
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_llm_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level or full EnvFilter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    ///
    /// Credentials are only required in strict environments; development
    /// runs against in-memory fixtures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_llm()?;
        self.validate_timeouts()?;

        if self.environment.is_strict() {
            self.validate_credentials()?;
        } else if self.sheets.spreadsheet_id.is_empty() || self.llm.api_key.is_empty() {
            tracing::warn!(
                environment = ?self.environment,
                "Spreadsheet id or model API key not set"
            );
        }

        Ok(())
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }

        if self.llm.max_tokens == 0 || self.llm.max_tokens > 8192 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens".to_string(),
                message: format!("Must be between 1 and 8192, got {}", self.llm.max_tokens),
            });
        }

        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("Must be between 0.0 and 1.0, got {}", self.llm.temperature),
            });
        }

        Ok(())
    }

    fn validate_timeouts(&self) -> Result<(), ConfigError> {
        if self.sheets.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sheets.timeout_secs".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    fn validate_credentials(&self) -> Result<(), ConfigError> {
        if self.sheets.spreadsheet_id.is_empty() {
            return Err(ConfigError::MissingField("sheets.spreadsheet_id".to_string()));
        }
        if self.sheets.access_token.is_empty() {
            return Err(ConfigError::MissingField("sheets.access_token".to_string()));
        }
        if self.llm.api_key.is_empty() {
            return Err(ConfigError::MissingField("llm.api_key".to_string()));
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Sources, later wins: `config/default`, `config/{env}`, then `VYAPAR__*`
/// environment variables (e.g. `VYAPAR__LLM__API_KEY`).
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("VYAPAR")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

/// Load settings from an explicit file (YAML or TOML by extension)
pub fn load_settings_from<P: AsRef<std::path::Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config = Config::builder()
        .add_source(File::from(path))
        .build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "claude-3-5-haiku-20241022");
        assert_eq!(settings.llm.max_tokens, 2000);
        assert_eq!(settings.sheets.endpoint, "https://sheets.googleapis.com");
        assert!(settings.business_profile_path.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_llm_validation() {
        let mut settings = Settings::default();
        settings.llm.temperature = 1.5;
        assert!(settings.validate().is_err());

        settings.llm.temperature = 0.3;
        settings.llm.max_tokens = 0;
        assert!(settings.validate().is_err());

        settings.llm.max_tokens = 1024;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_strict_environment_requires_credentials() {
        let mut settings = Settings {
            environment: RuntimeEnvironment::Production,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingField(_))
        ));

        settings.sheets.spreadsheet_id = "sheet-123".into();
        settings.sheets.access_token = "ya29.token".into();
        settings.llm.api_key = "sk-ant-test".into();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_settings_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "environment: staging\nsheets:\n  spreadsheet_id: abc\n  access_token: tok\nllm:\n  api_key: key\n  max_tokens: 512\nobservability:\n  log_json: true"
        )
        .unwrap();

        let settings = load_settings_from(file.path()).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.sheets.spreadsheet_id, "abc");
        assert_eq!(settings.llm.max_tokens, 512);
        assert_eq!(settings.llm.temperature, 0.7);
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_load_settings_missing_file() {
        assert!(matches!(
            load_settings_from("/nonexistent/settings.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
