//! Mock Prompt Service Implementation
//!
//! Returns a configurable prompt (or a configured failure) and records every
//! instruction it receives for test assertions.

use std::sync::{Arc, Mutex};

use artpost_common::{ApiError, Deadline};

use crate::LlmService;

const MOCK_PROMPT: &str = "A mock watercolor of a lighthouse at dusk";

/// Mock prompt service for testing
#[derive(Debug, Clone)]
pub struct MockLlmService {
    outcome: Result<String, ApiError>,
    instructions: Arc<Mutex<Vec<String>>>,
}

impl MockLlmService {
    /// Create a mock that answers with a fixed prompt
    pub fn new() -> Self {
        Self::with_prompt(MOCK_PROMPT)
    }

    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            outcome: Ok(prompt.into()),
            instructions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose every call fails with `error`
    pub fn failing(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            instructions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Instructions received so far
    pub fn recorded_instructions(&self) -> Vec<String> {
        self.instructions
            .lock()
            .expect("instructions lock poisoned — prior test panicked")
            .clone()
    }
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn generate_prompt(
        &self,
        instruction: &str,
        deadline: &Deadline,
    ) -> Result<String, ApiError> {
        tracing::info!("Mock prompt service processing request");
        deadline.check()?;
        self.instructions
            .lock()
            .map_err(|e| ApiError::Transport(format!("instructions lock poisoned: {e}")))?
            .push(instruction.to_string());
        self.outcome.clone()
    }
}
