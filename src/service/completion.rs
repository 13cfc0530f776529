//! Chat-completion client for AI-written report prose.

use anyhow::{Context, Result};
use rquest::Client;
use serde_json::json;

use crate::config::CompletionConfig;
use crate::service::http::{create_client, ClientType};

const TEMPERATURE: f64 = 0.4;
const MAX_TOKENS: u32 = 1200;

pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard)?,
            config,
        })
    }

    /// Send one system + user exchange and return the completion text.
    ///
    /// Callers treat any error as "no narrative produced" and fall back;
    /// nothing here is allowed to abort the pipeline.
    pub async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let request_body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to completion endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Completion endpoint error {}: {}", status, error_text);
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        let text = response_json["choices"][0]["message"]["content"]
            .as_str()
            .context("No content in completion response")?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> CompletionClient {
        CompletionClient::new(CompletionConfig {
            endpoint: format!("{}/v1/chat/completions", server.url()),
            api_key: "test-key".into(),
            model: "test-model".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_completion_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(
                r###"{"choices":[{"message":{"role":"assistant","content":"## Summary\nFine."}}]}"###,
            )
            .create_async()
            .await;

        let text = client_for(&server)
            .generate("You are an SEO expert.", "Analyze this page.")
            .await
            .unwrap();
        assert_eq!(text, "## Summary\nFine.");
    }

    #[tokio::test]
    async fn test_generate_fails_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":"rate limited"}"#)
            .create_async()
            .await;

        let result = client_for(&server).generate("sys", "user").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generate_fails_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let result = client_for(&server).generate("sys", "user").await;
        assert!(result.is_err());
    }
}
