//! Mock Social Service Implementation
//!
//! Stores calls in memory for test assertions and can be programmed to fail
//! either step. Thread-safe via `Arc<Mutex<>>`.

use std::sync::{Arc, Mutex};

use artpost_common::{ApiError, Deadline};

use crate::{PendingMedia, SocialService};

const MOCK_MEDIA_ID: &str = "mock-media-0001";

/// A recorded call for test assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialCall {
    Create {
        encoded_image_url: String,
        caption: String,
    },
    Publish {
        creation_id: String,
    },
}

/// Mock social service that records calls.
#[derive(Debug, Clone)]
pub struct MockSocialService {
    create_outcome: Result<String, ApiError>,
    publish_outcome: Result<(), ApiError>,
    calls: Arc<Mutex<Vec<SocialCall>>>,
}

impl MockSocialService {
    pub fn new() -> Self {
        Self {
            create_outcome: Ok(MOCK_MEDIA_ID.to_string()),
            publish_outcome: Ok(()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hand out `id` from media creation
    pub fn with_media_id(mut self, id: impl Into<String>) -> Self {
        self.create_outcome = Ok(id.into());
        self
    }

    pub fn failing_create(mut self, error: ApiError) -> Self {
        self.create_outcome = Err(error);
        self
    }

    pub fn failing_publish(mut self, error: ApiError) -> Self {
        self.publish_outcome = Err(error);
        self
    }

    /// Return all recorded calls in order.
    pub fn recorded_calls(&self) -> Vec<SocialCall> {
        self.calls
            .lock()
            .expect("calls lock poisoned — prior test panicked")
            .clone()
    }

    fn record(&self, call: SocialCall) -> Result<(), ApiError> {
        self.calls
            .lock()
            .map_err(|e| ApiError::Transport(format!("calls lock poisoned: {e}")))?
            .push(call);
        Ok(())
    }
}

impl Default for MockSocialService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SocialService for MockSocialService {
    async fn create_media(
        &self,
        encoded_image_url: &str,
        caption: &str,
        deadline: &Deadline,
    ) -> Result<PendingMedia, ApiError> {
        tracing::debug!("Mock social: recording media creation");
        deadline.check()?;
        self.record(SocialCall::Create {
            encoded_image_url: encoded_image_url.to_string(),
            caption: caption.to_string(),
        })?;
        self.create_outcome.clone().map(PendingMedia::new)
    }

    async fn publish_media(
        &self,
        media: PendingMedia,
        deadline: &Deadline,
    ) -> Result<(), ApiError> {
        tracing::debug!(creation_id = %media, "Mock social: recording publish");
        deadline.check()?;
        self.record(SocialCall::Publish {
            creation_id: media.id().to_string(),
        })?;
        self.publish_outcome.clone()
    }
}
