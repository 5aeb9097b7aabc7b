//! Mock Image Service Implementation
//!
//! Programmable mock for testing pipeline runs:
//! - `MockImageService`: returns a configured address or failure
//! - records every prompt it is asked to render

use std::sync::{Arc, Mutex};

use artpost_common::{ApiError, Deadline};

use crate::{GeneratedImage, ImageService};

const MOCK_IMAGE_URL: &str = "https://mock-images.example.com/generated/0001.png";

/// Mock image service with request recording
#[derive(Debug, Clone)]
pub struct MockImageService {
    outcome: Result<String, ApiError>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageService {
    pub fn new() -> Self {
        Self::with_url(MOCK_IMAGE_URL)
    }

    /// Answer every request with `url` (encoded on the way out)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            outcome: Ok(url.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get recorded prompts
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .expect("prompts lock poisoned — prior test panicked")
            .clone()
    }
}

impl Default for MockImageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ImageService for MockImageService {
    async fn generate_image(
        &self,
        prompt: &str,
        deadline: &Deadline,
    ) -> Result<GeneratedImage, ApiError> {
        tracing::info!(prompt_len = prompt.len(), "Mock image: received generation request");
        deadline.check()?;
        self.prompts
            .lock()
            .map_err(|e| ApiError::Transport(format!("prompts lock poisoned: {e}")))?
            .push(prompt.to_string());

        match &self.outcome {
            Ok(url) => Ok(GeneratedImage::from_raw(url)),
            Err(e) => Err(e.clone()),
        }
    }
}
