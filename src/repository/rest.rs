//! Report persistence over the hosted backend's row-store REST dialect.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rquest::Client;

use crate::config::BackendConfig;
use crate::domain::models::Report;
use crate::repository::ReportRepository;
use crate::service::http::{create_client, ClientType};

const REPORTS_TABLE: &str = "seo_reports";

pub struct RestReportRepository {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestReportRepository {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard)?,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
        })
    }
}

#[async_trait]
impl ReportRepository for RestReportRepository {
    async fn insert(&self, report: &Report) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/rest/v1/{}", self.base_url, REPORTS_TABLE))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(report)
            .send()
            .await
            .context("Failed to reach report store")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Report insert failed: HTTP {} {}", status, error_text);
        }

        Ok(())
    }
}
