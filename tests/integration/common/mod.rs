//! Shared fixtures for pipeline integration tests

use std::time::Duration;

use artpost_common::{Config, Credentials};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const ACCOUNT_ID: &str = "1789";

/// One mock server standing in for both OpenAI and the Graph API
pub struct TestApis {
    pub server: MockServer,
}

impl TestApis {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Config pointing every real client at the mock server
    pub fn config(&self) -> Config {
        Config {
            credentials: Credentials {
                chat_gpt_token: "sk-test".to_string(),
                ig_token: "ig-test".to_string(),
                ig_id: ACCOUNT_ID.to_string(),
            },
            openai_base_url: self.server.uri(),
            graph_base_url: format!("{}/v15.0", self.server.uri()),
            llm_provider: "openai".to_string(),
            image_provider: "openai".to_string(),
            social_provider: "graph".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub async fn mount_chat(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_images(&self, response: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(response)
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_create(&self, response: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/v15.0/{}/media", ACCOUNT_ID)))
            .respond_with(response)
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_publish(&self, response: ResponseTemplate, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/v15.0/{}/media_publish", ACCOUNT_ID)))
            .respond_with(response)
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }
}

pub fn chat_ok(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {"content": content}}]
    }))
}

pub fn image_ok(url: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": [{"url": url}]
    }))
}

pub fn media_ok(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id }))
}
