//! Environment-driven service configuration.
//!
//! Everything is resolved once at startup. The two collaborator configs are
//! optional on purpose: a missing completion key means the narrator runs on
//! its fallback template, and a missing backend config means reports are
//! computed but never persisted.

use std::env;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Chat-completion endpoint credentials for the narrator's primary path.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

/// Hosted backend (auth + row store) the persister talks to.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub service_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub completion: Option<CompletionConfig>,
    pub backend: Option<BackendConfig>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let completion = match env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => Some(CompletionConfig {
                endpoint: env::var("OPENAI_API_URL")
                    .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
                api_key: key,
                model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            }),
            _ => None,
        };

        let backend = match (env::var("BACKEND_URL"), env::var("BACKEND_SERVICE_KEY")) {
            (Ok(url), Ok(key)) if !url.is_empty() && !key.is_empty() => {
                Some(BackendConfig {
                    base_url: url.trim_end_matches('/').to_string(),
                    service_key: key,
                })
            }
            _ => None,
        };

        Self { bind_addr, completion, backend }
    }
}
