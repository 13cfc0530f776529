//! Caller identity resolution against the hosted auth provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rquest::Client;
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::service::http::{create_client, ClientType};

/// A resolved caller.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Exchanges a bearer token for a user identity. Failure is always
/// non-fatal to the pipeline; the persister simply skips its insert.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, bearer_token: &str) -> Result<Identity>;
}

/// Auth endpoint implementation over the hosted backend's REST dialect.
pub struct RestIdentityProvider {
    client: Client,
    base_url: String,
    service_key: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
}

impl RestIdentityProvider {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard)?,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn resolve(&self, bearer_token: &str) -> Result<Identity> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {bearer_token}"))
            .send()
            .await
            .context("Failed to reach auth provider")?;

        if !response.status().is_success() {
            anyhow::bail!("Auth provider rejected token: HTTP {}", response.status());
        }

        let user: UserResponse = response
            .json()
            .await
            .context("Failed to parse auth provider response")?;

        Ok(Identity { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_for(server: &mockito::Server) -> RestIdentityProvider {
        RestIdentityProvider::new(&BackendConfig {
            base_url: server.url(),
            service_key: "service-key".into(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_returns_user_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", "Bearer user-token")
            .match_header("apikey", "service-key")
            .with_status(200)
            .with_body(r#"{"id":"user-42","email":"u@example.com"}"#)
            .create_async()
            .await;

        let identity = provider_for(&server).resolve("user-token").await.unwrap();
        assert_eq!(identity.user_id, "user-42");
    }

    #[tokio::test]
    async fn test_resolve_fails_on_rejected_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/v1/user")
            .with_status(401)
            .create_async()
            .await;

        assert!(provider_for(&server).resolve("bad-token").await.is_err());
    }
}
