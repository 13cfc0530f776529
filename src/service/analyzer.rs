//! The audit pipeline: fetch -> extract -> score -> narrate -> persist.
//!
//! Strictly linear, one pass per invocation. Only input validation and the
//! fetch can fail the pipeline; narration and persistence are best-effort
//! steps that log and degrade.

use std::sync::Arc;

use chrono::Utc;
use rquest::Client;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::domain::models::{Analysis, AnalyzeRequest, Report};
use crate::error::AppError;
use crate::extractor::SignalExtractor;
use crate::repository::ReportRepository;
use crate::scorer;
use crate::service::auth::IdentityProvider;
use crate::service::http::{create_client, ClientType};
use crate::service::narrator::Narrator;

pub struct AnalyzeService {
    page_client: Client,
    narrator: Narrator,
    identity: Option<Arc<dyn IdentityProvider>>,
    reports: Option<Arc<dyn ReportRepository>>,
}

impl AnalyzeService {
    pub fn new(
        narrator: Narrator,
        identity: Option<Arc<dyn IdentityProvider>>,
        reports: Option<Arc<dyn ReportRepository>>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            page_client: create_client(ClientType::BrowserEmulation)?,
            narrator,
            identity,
            reports,
        })
    }

    /// Run one full audit. The bearer token, when present, only influences
    /// whether the report row is stored; the response is the same either way.
    pub async fn analyze(
        &self,
        request: AnalyzeRequest,
        bearer_token: Option<&str>,
    ) -> Result<Analysis, AppError> {
        // 1. Validate input before any I/O
        let url = request
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or(AppError::MissingUrl)?;
        let parsed = Url::parse(&url).map_err(|e| AppError::InvalidUrl(format!("{url}: {e}")))?;

        info!("analyzing {url} (lang={})", request.lang.as_str());

        // 2. Fetch the page
        let html = self.fetch_page(parsed.as_str()).await?;
        debug!("fetched {} bytes from {url}", html.len());

        // 3. Extract signals and score them
        let signals = SignalExtractor::extract(&html);
        let scores = scorer::score(&signals);
        debug!(
            "scored {url}: global={} mobile={} desktop={}",
            scores.global, scores.mobile, scores.desktop
        );

        // 4. Narrate (primary or fallback; cannot fail)
        let narrative = self
            .narrator
            .produce(&url, &signals, &scores, request.lang)
            .await;

        let analysis = Analysis {
            url,
            lang: request.lang,
            signals,
            scores,
            narrative,
            analyzed_at: Utc::now(),
        };

        // 5. Persist, best-effort
        self.persist(&analysis, bearer_token).await;

        Ok(analysis)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .page_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::FetchFailed { url: url.to_string(), source: e.into() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchStatus { url: url.to_string(), status: status.as_u16() });
        }

        response
            .text()
            .await
            .map_err(|e| AppError::FetchFailed { url: url.to_string(), source: e.into() })
    }

    /// Store the report under the calling user, when both a backend and a
    /// resolvable token exist. Every failure here is logged and swallowed;
    /// the caller still gets the computed report.
    async fn persist(&self, analysis: &Analysis, bearer_token: Option<&str>) {
        let (Some(identity), Some(reports)) = (&self.identity, &self.reports) else {
            debug!("persistence disabled, skipping report insert");
            return;
        };
        let Some(token) = bearer_token else {
            debug!("no bearer token supplied, skipping report insert");
            return;
        };

        let user = match identity.resolve(token).await {
            Ok(user) => user,
            Err(e) => {
                warn!("could not resolve caller identity, skipping report insert: {e:#}");
                return;
            }
        };

        let report = Report::new(&user.user_id, analysis);
        match reports.insert(&report).await {
            Ok(()) => info!("stored report {} for user {}", report.id, user.user_id),
            Err(e) => error!("failed to store report for user {}: {e:#}", user.user_id),
        }
    }
}
