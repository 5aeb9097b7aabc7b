//! Configuration loading
//!
//! Values come from a dotenv-style `app.env` file in the config directory,
//! falling back per key to equally-named environment variables. The file is
//! read without touching the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::deadline::DEFAULT_TIMEOUT;

pub const CONFIG_FILE_NAME: &str = "app.env";

pub const CHAT_GPT_TOKEN: &str = "CHAT_GPT_TOKEN";
pub const IG_TOKEN: &str = "IG_TOKEN";
pub const IG_ID: &str = "IG_ID";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v15.0";

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing credential: {0} is not set in app.env or the environment")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Unknown {service} provider: {provider}. Supported providers: {supported}")]
    UnknownProvider {
        service: &'static str,
        provider: String,
        supported: &'static str,
    },
}

/// The three secrets the pipeline needs. Read-only for the whole run.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    /// Bearer token for the OpenAI chat and image endpoints
    pub chat_gpt_token: String,
    /// Graph API access token
    pub ig_token: String,
    /// Instagram business account id
    pub ig_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_gpt_token", &"[REDACTED]")
            .field("ig_token", &"[REDACTED]")
            .field("ig_id", &self.ig_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,

    /// External service endpoints
    pub openai_base_url: String,
    pub graph_base_url: String,

    /// Provider selection per step (real client or `mock`)
    pub llm_provider: String,
    pub image_provider: String,
    pub social_provider: String,

    /// Overall budget for one run
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from `$ARTPOST_CONFIG_DIR/app.env` (default `.`)
    /// and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dir = std::env::var("ARTPOST_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Self::load(&dir)
    }

    /// Load configuration from `dir/app.env` and the process environment.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let file = read_config_file(&dir.join(CONFIG_FILE_NAME));
        Self::from_sources(&file, |key| std::env::var(key).ok())
    }

    /// Build a config from already-read file values and an environment lookup.
    ///
    /// A non-empty file value wins; otherwise the environment is consulted.
    pub fn from_sources<E>(file: &HashMap<String, String>, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| -> Option<String> {
            file.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .or_else(|| env(key).filter(|v| !v.is_empty()))
        };
        let required =
            |key: &'static str| lookup(key).ok_or(ConfigError::MissingCredential(key));

        let credentials = Credentials {
            chat_gpt_token: required(CHAT_GPT_TOKEN)?,
            ig_token: required(IG_TOKEN)?,
            ig_id: required(IG_ID)?,
        };

        let timeout = match lookup("ARTPOST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "ARTPOST_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            credentials,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            graph_base_url: lookup("GRAPH_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
            llm_provider: lookup("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string()),
            image_provider: lookup("IMAGE_PROVIDER").unwrap_or_else(|| "openai".to_string()),
            social_provider: lookup("SOCIAL_PROVIDER").unwrap_or_else(|| "graph".to_string()),
            timeout,
        })
    }
}

/// Read a dotenv-style file into a map. A missing or unreadable file yields
/// an empty map so that the environment alone can supply every value.
fn read_config_file(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "Cannot load config file, using environment variables");
            return HashMap::new();
        }
    };

    let mut values = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed config file, using environment variables");
                return HashMap::new();
            }
        }
    }
    tracing::debug!(path = %path.display(), keys = values.len(), "Config file loaded");
    values
}
