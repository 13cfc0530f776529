//! Adapter layer for converting domain models to API response types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::{Analysis, PageSignals, ScoreTriple};

/// Success payload returned for every completed audit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub url: String,
    pub scores: ScoreTriple,
    pub analysis: PageSignals,
    pub ai_analysis: String,
    pub analyzed_at: DateTime<Utc>,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            url: analysis.url,
            scores: analysis.scores,
            analysis: analysis.signals,
            ai_analysis: analysis.narrative,
            analyzed_at: analysis.analyzed_at,
        }
    }
}
