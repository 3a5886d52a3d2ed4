//! Prompt agent configuration.

use crate::llm_client::{Credentials, GenerationParams, LlmConfig, LlmProvider};
use crate::prompt::PromptTemplate;
use crate::templates::TemplatePreset;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for one prompt-driven chess player.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent name (shown in logs and results).
    name: String,

    /// LLM provider (openai, gooseai, anthropic or cohere).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o-mini", "claude-3-5-haiku-20241022").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature.
    #[serde(default)]
    temperature: f32,

    /// Built-in template used when no custom text is given.
    #[serde(default)]
    template: TemplatePreset,

    /// Inline template text; takes precedence over `template_file` and `template`.
    #[serde(default)]
    template_text: Option<String>,

    /// Template file, resolved relative to the config file's directory.
    #[serde(default)]
    template_file: Option<PathBuf>,

    /// Seed for reproducible random fallback moves.
    #[serde(default)]
    seed: Option<u64>,

    /// Custom API base URL.
    #[serde(default)]
    base_url: Option<String>,
}

#[instrument]
fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

#[instrument]
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

#[instrument]
fn default_max_tokens() -> u32 {
    *GenerationParams::default().max_tokens()
}

impl AgentConfig {
    /// Creates a configuration with default template and sampling settings.
    #[instrument(skip(name, llm_model), fields(agent_name = %name))]
    pub fn new(name: String, llm_provider: LlmProvider, llm_model: String) -> Self {
        Self {
            name,
            llm_provider,
            llm_model,
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            template: TemplatePreset::default(),
            template_text: None,
            template_file: None,
            seed: None,
            base_url: None,
        }
    }

    /// Selects a built-in template.
    pub fn with_template(mut self, template: TemplatePreset) -> Self {
        self.template = template;
        self
    }

    /// Uses custom template text.
    pub fn with_template_text(mut self, text: impl Into<String>) -> Self {
        self.template_text = Some(text.into());
        self
    }

    /// Fixes the fallback seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads configuration from TOML file.
    ///
    /// A relative `template_file` is resolved against the file's directory.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if let Some(file) = config.template_file.take() {
            config.template_file = Some(match path.parent() {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file,
            });
        }

        info!(agent_name = %config.name, "Config loaded successfully");
        Ok(config)
    }

    /// Sampling parameters for this agent.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::new(self.max_tokens, self.temperature)
    }

    /// Template in effect: inline text, then template file, then preset.
    #[instrument(skip(self), fields(agent_name = %self.name))]
    pub fn resolve_template(&self) -> Result<PromptTemplate, ConfigError> {
        if let Some(text) = &self.template_text {
            debug!("Using inline template text");
            return Ok(PromptTemplate::new(text.clone()));
        }

        if let Some(file) = &self.template_file {
            debug!(path = %file.display(), "Reading template file");
            let text = std::fs::read_to_string(file).map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read template file {}: {}",
                    file.display(),
                    e
                ))
            })?;
            return Ok(PromptTemplate::new(text));
        }

        debug!(preset = %self.template, "Using built-in template");
        Ok(PromptTemplate::from(self.template))
    }

    /// Creates LLM configuration from this agent config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `credentials` hold no key for the provider.
    #[instrument(skip(self, credentials), fields(provider = %self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self, credentials: &Credentials) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let api_key = credentials.key_for(self.llm_provider).ok_or_else(|| {
            ConfigError::new(format!(
                "{} environment variable not set",
                self.llm_provider.api_key_var()
            ))
        })?;

        let config = LlmConfig::new(
            self.llm_provider,
            api_key.to_string(),
            self.llm_model.clone(),
            self.generation_params(),
        );

        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
