//! Artpost Prompt Generation
//!
//! Asks a chat-completion model for a short art concept:
//! - OpenAI chat completions integration for production
//! - Mock prompt service for testing and dry runs
//! - Provider selection through `LlmServiceFactory`

pub mod mock;
pub mod openai;

use artpost_common::{ApiError, Config, ConfigError, Deadline};

/// System instruction sent with every prompt request
pub const DEFAULT_INSTRUCTION: &str =
    "Original art piece description in a specific style in about 30 words.";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Prompt service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider (openai, mock)
    pub provider: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl LlmConfig {
    /// Derive the prompt service config from the application config
    pub fn from_config(config: &Config) -> Self {
        Self {
            provider: config.llm_provider.clone(),
            api_key: config.credentials.chat_gpt_token.clone(),
            base_url: config.openai_base_url.clone(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Prompt generation trait for different backends
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Request one completion for `instruction` and return the first
    /// choice's text.
    async fn generate_prompt(
        &self,
        instruction: &str,
        deadline: &Deadline,
    ) -> Result<String, ApiError>;
}

/// Factory for creating LlmService implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, ConfigError> {
        match config.provider.as_str() {
            "openai" => {
                tracing::info!(model = %config.model, "Creating OpenAI prompt service");
                Ok(Box::new(openai::OpenAiChatService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock prompt service");
                Ok(Box::new(mock::MockLlmService::new()))
            }
            provider => Err(ConfigError::UnknownProvider {
                service: "LLM",
                provider: provider.to_string(),
                supported: "openai, mock",
            }),
        }
    }
}
