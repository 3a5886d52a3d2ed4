//! Text-completion clients for OpenAI, GooseAI, Anthropic and Cohere.

use crate::agent_config::ConfigError;
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateCompletionRequestArgs,
    },
};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// GooseAI serves the OpenAI completions API from its own base URL.
const GOOSEAI_API_BASE: &str = "https://api.goose.ai/v1";
const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const COHERE_API_BASE: &str = "https://api.cohere.ai/v1";

/// Pause before every Cohere call to stay under the free-tier rate limit.
const COHERE_PRE_CALL_DELAY: Duration = Duration::from_secs(1);

/// Text-generation backend selection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI chat models.
    OpenAI,
    /// GooseAI text completion models (OpenAI-compatible API).
    GooseAI,
    /// Anthropic (Claude models).
    Anthropic,
    /// Cohere generation models.
    Cohere,
}

impl LlmProvider {
    /// Parses a provider identifier such as `"openai"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for identifiers that name no backend.
    #[instrument]
    pub fn from_id(id: &str) -> Result<Self, ConfigError> {
        Self::from_str(&id.to_ascii_lowercase())
            .map_err(|_| ConfigError::new(format!("Unknown LLM provider: {}", id)))
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::GooseAI => "GOOSEAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Cohere => "COHERE_API_KEY",
        }
    }

    /// Pause inserted before each call.
    pub fn default_pre_call_delay(self) -> Duration {
        match self {
            LlmProvider::Cohere => COHERE_PRE_CALL_DELAY,
            _ => Duration::ZERO,
        }
    }
}

/// API keys per provider, passed explicitly to whoever builds clients.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: HashMap<LlmProvider, String>,
}

impl Credentials {
    /// Empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every provider's key variable that is set and non-empty.
    #[instrument]
    pub fn from_env() -> Self {
        use strum::IntoEnumIterator;

        let keys: HashMap<_, _> = LlmProvider::iter()
            .filter_map(|provider| {
                std::env::var(provider.api_key_var())
                    .ok()
                    .filter(|key| !key.is_empty())
                    .map(|key| (provider, key))
            })
            .collect();
        debug!(providers = ?keys.keys().collect::<Vec<_>>(), "Loaded credentials");
        Self { keys }
    }

    /// Adds or replaces the key for `provider`.
    pub fn with_key(mut self, provider: LlmProvider, key: impl Into<String>) -> Self {
        self.keys.insert(provider, key.into());
        self
    }

    /// Key for `provider`, if present.
    pub fn key_for(&self, provider: LlmProvider) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("providers", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new, Getters)]
pub struct GenerationParams {
    /// Maximum number of generated tokens.
    max_tokens: u32,
    /// Sampling temperature; 0 is greedy.
    temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 50,
            temperature: 0.0,
        }
    }
}

/// One completion call, built fresh for every prompt.
#[derive(Debug, Clone, new, Getters)]
pub struct CompletionRequest {
    /// Prompt text.
    prompt: String,
    /// Backend to call.
    provider: LlmProvider,
    /// Model identifier.
    model: String,
    /// Sampling parameters.
    params: GenerationParams,
}

/// Configuration for LLM client.
#[derive(Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    params: GenerationParams,
    base_url: Option<String>,
    pre_call_delay: Duration,
}

impl LlmConfig {
    /// Creates a new LLM configuration with the provider's default pacing.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(
        provider: LlmProvider,
        api_key: String,
        model: String,
        params: GenerationParams,
    ) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            params,
            base_url: None,
            pre_call_delay: provider.default_pre_call_delay(),
        }
    }

    /// Points the client at a different API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Overrides the pause inserted before each call.
    pub fn with_pre_call_delay(mut self, delay: Duration) -> Self {
        self.pre_call_delay = delay;
        self
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the sampling parameters.
    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Gets the base URL override.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Gets the pre-call pause.
    pub fn pre_call_delay(&self) -> Duration {
        self.pre_call_delay
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("params", &self.params)
            .field("base_url", &self.base_url)
            .field("pre_call_delay", &self.pre_call_delay)
            .finish_non_exhaustive()
    }
}

/// Anything that turns a prompt into completion text.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the primary continuation for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = %config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Creates a client that sends HTTP requests through `http`.
    #[instrument(skip(config, http), fields(provider = %config.provider()))]
    pub fn with_http_client(config: LlmConfig, http: reqwest::Client) -> Self {
        info!("Creating LLM client");
        Self { config, http }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion for a fully built request.
    #[instrument(skip(self, request), fields(provider = %request.provider(), model = %request.model()))]
    pub async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let delay = self.config.pre_call_delay;
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "Pausing before call");
            tokio::time::sleep(delay).await;
        }

        debug!(prompt_length = request.prompt().len(), "Generating completion");
        match request.provider() {
            LlmProvider::OpenAI => self.generate_openai(request).await,
            LlmProvider::GooseAI => self.generate_gooseai(request).await,
            LlmProvider::Anthropic => self.generate_anthropic(request).await,
            LlmProvider::Cohere => self.generate_cohere(request).await,
        }
    }

    /// OpenAI-compatible client sharing this client's HTTP pool.
    ///
    /// Failed calls are never retried: the backoff gives up before its
    /// first wait, so errors reach the caller after a single request.
    fn openai_client(&self, default_base: Option<&str>) -> OpenAIClient<OpenAIConfig> {
        let mut config = OpenAIConfig::new().with_api_key(self.config.api_key.clone());
        if let Some(base) = self.config.base_url().or(default_base) {
            config = config.with_api_base(base);
        }
        OpenAIClient::with_config(config)
            .with_http_client(self.http.clone())
            .with_backoff(
                backoff::ExponentialBackoffBuilder::new()
                    .with_max_elapsed_time(Some(Duration::ZERO))
                    .build(),
            )
    }

    /// Generates a completion using OpenAI chat completions.
    #[instrument(skip(self, request))]
    async fn generate_openai(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let client = self.openai_client(None);

        debug!("Building chat completion request");
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt().as_str())
                .build()
                .map_err(|e| {
                    error!(error = ?e, "Failed to build user message");
                    LlmError::new(format!("Failed to build user message: {}", e))
                })?,
        )];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(request.model().as_str())
            .messages(messages)
            .temperature(*request.params().temperature());

        // OpenAI-compatible servers behind a custom base URL mostly only
        // understand the older `max_tokens` field.
        let max_tokens = *request.params().max_tokens();
        if self.config.base_url().is_some() {
            #[allow(deprecated)]
            args.max_tokens(max_tokens);
        } else {
            args.max_completion_tokens(max_tokens);
        }

        let chat_request = args
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build request");
                LlmError::new(format!("Failed to build request: {}", e))
            })?;

        debug!("Sending request to OpenAI");
        let response = client.chat().create(chat_request).await.map_err(|e| {
            error!(error = ?e, "OpenAI API error");
            LlmError::new(format!("OpenAI API error: {}", e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                error!("No content in OpenAI response");
                LlmError::new("No content in OpenAI response".to_string())
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using GooseAI's text completion endpoint.
    #[instrument(skip(self, request))]
    async fn generate_gooseai(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let client = self.openai_client(Some(GOOSEAI_API_BASE));

        debug!("Building text completion request");
        let completion_request = CreateCompletionRequestArgs::default()
            .model(request.model().as_str())
            .prompt(request.prompt().as_str())
            .max_tokens(*request.params().max_tokens())
            .temperature(*request.params().temperature())
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build request");
                LlmError::new(format!("Failed to build request: {}", e))
            })?;

        debug!("Sending request to GooseAI");
        let response = client
            .completions()
            .create(completion_request)
            .await
            .map_err(|e| {
                error!(error = ?e, "GooseAI API error");
                LlmError::new(format!("GooseAI API error: {}", e))
            })?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.text.clone())
            .ok_or_else(|| {
                error!("No choices in GooseAI response");
                LlmError::new("No choices in GooseAI response".to_string())
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip(self, request))]
    async fn generate_anthropic(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!(
            "{}/messages",
            self.config.base_url().unwrap_or(ANTHROPIC_API_BASE)
        );

        debug!("Building Anthropic API request");
        let request_body = serde_json::json!({
            "model": request.model(),
            "max_tokens": request.params().max_tokens(),
            "temperature": request.params().temperature(),
            "messages": [
                {
                    "role": "user",
                    "content": request.prompt()
                }
            ]
        });

        let builder = self
            .http
            .post(url)
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body);
        let response_json = send_json(LlmProvider::Anthropic, builder).await?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Anthropic response");
                LlmError::new("No text content in Anthropic response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using Cohere's generate endpoint.
    #[instrument(skip(self, request))]
    async fn generate_cohere(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!(
            "{}/generate",
            self.config.base_url().unwrap_or(COHERE_API_BASE)
        );

        debug!("Building Cohere API request");
        let request_body = serde_json::json!({
            "model": request.model(),
            "prompt": request.prompt(),
            "max_tokens": request.params().max_tokens(),
            "temperature": request.params().temperature(),
        });

        let builder = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&request_body);
        let response_json = send_json(LlmProvider::Cohere, builder).await?;

        let content = response_json["generations"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No generation in Cohere response");
                LlmError::new("No generation in Cohere response".to_string())
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = CompletionRequest::new(
            prompt.to_string(),
            self.config.provider,
            self.config.model.clone(),
            self.config.params,
        );
        self.generate(&request).await
    }
}

/// Sends a JSON request and parses a JSON response body.
async fn send_json(
    provider: LlmProvider,
    builder: reqwest::RequestBuilder,
) -> Result<serde_json::Value, LlmError> {
    debug!(provider = %provider, "Sending request");
    let response = builder.send().await.map_err(|e| {
        error!(error = ?e, provider = %provider, "API request failed");
        LlmError::new(format!("{} API request failed: {}", provider, e))
    })?;

    let status = response.status();
    let response_text = response.text().await.map_err(|e| {
        error!(error = ?e, provider = %provider, "Failed to read response");
        LlmError::new(format!("Failed to read response: {}", e))
    })?;

    if !status.is_success() {
        error!(status = %status, response = %response_text, provider = %provider, "API error");
        return Err(LlmError::new(format!(
            "{} API error {}: {}",
            provider, status, response_text
        )));
    }

    debug!(response_length = response_text.len(), "Parsing response");
    serde_json::from_str(&response_text).map_err(|e| {
        error!(error = ?e, response = %response_text, "Failed to parse response");
        LlmError::new(format!("Failed to parse response: {}", e))
    })
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
