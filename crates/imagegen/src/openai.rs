//! OpenAI Images Implementation
//!
//! Calls the image generation API (`{base_url}/v1/images/generations`).

use artpost_common::{execute, ApiError, Deadline};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{GeneratedImage, ImageConfig, ImageService, DEFAULT_IMAGE_COUNT};

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}

/// OpenAI-backed image service
pub struct OpenAiImageService {
    client: Client,
    config: ImageConfig,
}

impl OpenAiImageService {
    pub fn new(config: ImageConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl ImageService for OpenAiImageService {
    async fn generate_image(
        &self,
        prompt: &str,
        deadline: &Deadline,
    ) -> Result<GeneratedImage, ApiError> {
        let body = ImageRequest {
            prompt,
            n: DEFAULT_IMAGE_COUNT,
            size: &self.config.size,
        };
        let url = format!(
            "{}/v1/images/generations",
            self.config.base_url.trim_end_matches('/')
        );

        tracing::debug!(size = %self.config.size, "Sending image generation request");

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body);

        let reply = execute(deadline, request).await?.require_ok()?;
        let response: ImageResponse = reply.json()?;

        let first = response.data.into_iter().next().ok_or_else(|| {
            ApiError::EmptyResult(format!(
                "response data does not contain a url: {:?}",
                reply.body
            ))
        })?;

        tracing::info!(image_url = %first.url, "Image generated");
        Ok(GeneratedImage::from_raw(&first.url))
    }
}
