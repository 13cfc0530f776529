//! Service startup wiring.
//!
//! Resolves configuration into the analyzer's collaborators once, logging
//! which degraded modes (no narration endpoint, no persistence) are active.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::repository::{ReportRepository, RestReportRepository};
use crate::server::AppState;
use crate::service::auth::{IdentityProvider, RestIdentityProvider};
use crate::service::{AnalyzeService, CompletionClient, Narrator};

/// Initialize logging with tracing_subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seopulse=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Build the shared application state from resolved configuration.
pub fn build_state(config: &Config) -> Result<AppState> {
    let narrator = match &config.completion {
        Some(completion) => {
            info!("narration via {} ({})", completion.endpoint, completion.model);
            Narrator::new(Some(CompletionClient::new(completion.clone())?))
        }
        None => {
            warn!("no completion endpoint configured; reports will use the templated fallback");
            Narrator::new(None)
        }
    };

    let (identity, reports) = match &config.backend {
        Some(backend) => {
            info!("persisting reports to {}", backend.base_url);
            (
                Some(Arc::new(RestIdentityProvider::new(backend)?) as Arc<dyn IdentityProvider>),
                Some(Arc::new(RestReportRepository::new(backend)?) as Arc<dyn ReportRepository>),
            )
        }
        None => {
            warn!("no backend configured; reports will not be persisted");
            (None, None)
        }
    };

    Ok(AppState {
        analyzer: Arc::new(AnalyzeService::new(narrator, identity, reports)?),
    })
}
