use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Report;

pub mod rest;

pub use rest::RestReportRepository;

/// Insert-only store for audit reports. The pipeline has no read path.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn insert(&self, report: &Report) -> Result<()>;
}
