//! Artpost Image Generation
//!
//! Turns a text prompt into a hosted image address:
//! - OpenAI images API integration for production
//! - Mock image service for testing and dry runs
//! - Query-component encoding of the returned address for later embedding

pub mod mock;
pub mod openai;

use artpost_common::{ApiError, Config, ConfigError, Deadline};

pub const DEFAULT_IMAGE_COUNT: u32 = 1;
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// A generated image as returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Trimmed address as returned by the provider
    pub url: String,
    /// `url` percent-encoded for use as a query parameter value
    pub encoded_url: String,
}

impl GeneratedImage {
    pub fn from_raw(raw: &str) -> Self {
        let url = raw.trim().to_string();
        let encoded_url = urlencoding::encode(&url).into_owned();
        Self { url, encoded_url }
    }
}

/// Image service configuration
#[derive(Clone)]
pub struct ImageConfig {
    /// Provider (openai, mock)
    pub provider: String,
    pub api_key: String,
    pub base_url: String,
    pub size: String,
}

impl std::fmt::Debug for ImageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("size", &self.size)
            .finish()
    }
}

impl ImageConfig {
    /// Derive the image service config from the application config
    pub fn from_config(config: &Config) -> Self {
        Self {
            provider: config.image_provider.clone(),
            api_key: config.credentials.chat_gpt_token.clone(),
            base_url: config.openai_base_url.clone(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}

/// Image generation trait for different backends
#[async_trait::async_trait]
pub trait ImageService: Send + Sync {
    /// Generate a single image for `prompt`.
    async fn generate_image(
        &self,
        prompt: &str,
        deadline: &Deadline,
    ) -> Result<GeneratedImage, ApiError>;
}

/// Factory for creating ImageService implementations
pub struct ImageServiceFactory;

impl ImageServiceFactory {
    pub fn create(config: ImageConfig) -> Result<Box<dyn ImageService>, ConfigError> {
        match config.provider.as_str() {
            "openai" => {
                tracing::info!(size = %config.size, "Creating OpenAI image service");
                Ok(Box::new(openai::OpenAiImageService::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock image service");
                Ok(Box::new(mock::MockImageService::new()))
            }
            provider => Err(ConfigError::UnknownProvider {
                service: "image",
                provider: provider.to_string(),
                supported: "openai, mock",
            }),
        }
    }
}
