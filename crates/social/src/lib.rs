//! Artpost Social Publishing
//!
//! Two-step Instagram Graph API flow:
//! - create a pending media object from an image address and caption
//! - publish that pending media object
//!
//! A created-but-unpublished media object is simply abandoned on failure.

pub mod graph;
pub mod mock;

use artpost_common::{ApiError, Config, ConfigError, Deadline};

/// Opaque id of a media object created but not yet published.
///
/// Publishing consumes it; it is never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMedia(String);

impl PendingMedia {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PendingMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Social service configuration
#[derive(Clone)]
pub struct SocialConfig {
    /// Provider (graph, mock)
    pub provider: String,
    pub access_token: String,
    pub account_id: String,
    /// Versioned Graph API root, e.g. `https://graph.facebook.com/v15.0`
    pub base_url: String,
}

impl std::fmt::Debug for SocialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialConfig")
            .field("provider", &self.provider)
            .field("access_token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SocialConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            provider: config.social_provider.clone(),
            access_token: config.credentials.ig_token.clone(),
            account_id: config.credentials.ig_id.clone(),
            base_url: config.graph_base_url.clone(),
        }
    }
}

/// Social publishing trait for different implementations
#[async_trait::async_trait]
pub trait SocialService: Send + Sync {
    /// Register an image (already query-encoded) and caption as pending media.
    async fn create_media(
        &self,
        encoded_image_url: &str,
        caption: &str,
        deadline: &Deadline,
    ) -> Result<PendingMedia, ApiError>;

    /// Publish pending media. Success is decided by status code alone.
    async fn publish_media(&self, media: PendingMedia, deadline: &Deadline)
        -> Result<(), ApiError>;
}

/// Factory for creating SocialService implementations
pub struct SocialServiceFactory;

impl SocialServiceFactory {
    pub fn create(config: SocialConfig) -> Result<Box<dyn SocialService>, ConfigError> {
        match config.provider.as_str() {
            "graph" => {
                tracing::info!(account_id = %config.account_id, "Creating Graph API social service");
                Ok(Box::new(graph::GraphClient::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock social service");
                Ok(Box::new(mock::MockSocialService::new()))
            }
            provider => Err(ConfigError::UnknownProvider {
                service: "social",
                provider: provider.to_string(),
                supported: "graph, mock",
            }),
        }
    }
}
