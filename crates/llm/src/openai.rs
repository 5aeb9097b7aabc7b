//! OpenAI Chat Completions Implementation
//!
//! Calls the chat completions API (`{base_url}/v1/chat/completions`)
//! using reqwest HTTP client.

use artpost_common::{execute, ApiError, Deadline};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{LlmConfig, LlmService};

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenAI chat-backed prompt service
pub struct OpenAiChatService {
    client: Client,
    config: LlmConfig,
}

impl OpenAiChatService {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl LlmService for OpenAiChatService {
    async fn generate_prompt(
        &self,
        instruction: &str,
        deadline: &Deadline,
    ) -> Result<String, ApiError> {
        let body = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![ChatMessage {
                role: "system",
                content: instruction,
            }],
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        tracing::debug!(model = %self.config.model, temperature = %self.config.temperature, "Sending chat completion request");

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body);

        let reply = execute(deadline, request).await?.require_ok()?;
        let response: ChatResponse = reply.json()?;

        // Only one completion is requested
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ApiError::EmptyResult("no choices returned in chat completion response".to_string())
        })?;

        Ok(choice.message.content)
    }
}
