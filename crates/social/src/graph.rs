//! Instagram Graph API Client
//!
//! Media creation and publishing are both query-string POSTs against
//! `{base_url}/{account_id}/media` and `{base_url}/{account_id}/media_publish`.

use artpost_common::{execute, ApiError, Deadline};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use urlencoding::encode;

use crate::{PendingMedia, SocialConfig, SocialService};

#[derive(Debug, Deserialize)]
struct MediaResponse {
    id: String,
}

/// Real Graph API client.
pub struct GraphClient {
    http: reqwest::Client,
    config: SocialConfig,
}

impl GraphClient {
    pub fn new(config: SocialConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn account_url(&self, edge: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            encode(&self.config.account_id),
            edge
        )
    }
}

#[async_trait::async_trait]
impl SocialService for GraphClient {
    async fn create_media(
        &self,
        encoded_image_url: &str,
        caption: &str,
        deadline: &Deadline,
    ) -> Result<PendingMedia, ApiError> {
        // image_url arrives encoded and is inserted verbatim
        let url = format!(
            "{}?access_token={}&image_url={}&caption={}",
            self.account_url("media"),
            encode(&self.config.access_token),
            encoded_image_url,
            encode(caption)
        );

        tracing::debug!(account_id = %self.config.account_id, "Creating pending media");

        let request = self.http.post(url).header(CACHE_CONTROL, "no-cache");
        let reply = execute(deadline, request).await?.require_ok()?;
        let response: MediaResponse = reply.json()?;

        Ok(PendingMedia::new(response.id))
    }

    async fn publish_media(
        &self,
        media: PendingMedia,
        deadline: &Deadline,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}?access_token={}&creation_id={}",
            self.account_url("media_publish"),
            encode(&self.config.access_token),
            encode(media.id())
        );

        tracing::debug!(creation_id = %media, "Publishing media");

        let reply = execute(deadline, self.http.post(url))
            .await?
            .require_ok()?;

        tracing::info!(response = %reply.body, "Media published");
        Ok(())
    }
}
