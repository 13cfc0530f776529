//! Domain entities for a single audit invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ====== Enums ======

/// Report language. Falls back to English when the caller omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }
}

// ====== Request / signals / scores ======

/// Incoming audit request body. The URL is validated by the pipeline, not by
/// deserialization, so that a missing field still produces the flat error
/// shape instead of a rejection from the JSON extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub lang: Lang,
}

/// The raw SEO facts pattern-matched out of one page.
///
/// Extraction is total: every field has a defined value for any input, so
/// this struct always serializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: i64,
    pub h2_count: i64,
    pub total_images: i64,
    pub images_without_alt: i64,
    pub has_viewport: bool,
    pub has_canonical: bool,
}

/// Weighted-penalty scores, each clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub global: i64,
    pub mobile: i64,
    pub desktop: i64,
}

// ====== Pipeline output ======

/// Everything one invocation computes. Immutable once built.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub url: String,
    pub lang: Lang,
    pub signals: PageSignals,
    pub scores: ScoreTriple,
    pub narrative: String,
    pub analyzed_at: DateTime<Utc>,
}

/// One immutable report row, keyed by the authenticated caller.
/// Field names are the row-store column names.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub url: String,
    pub lang: Lang,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: i64,
    pub h2_count: i64,
    pub total_images: i64,
    pub images_without_alt: i64,
    pub has_viewport: bool,
    pub has_canonical: bool,
    pub global_score: i64,
    pub mobile_score: i64,
    pub desktop_score: i64,
    pub ai_analysis: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(user_id: &str, analysis: &Analysis) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            url: analysis.url.clone(),
            lang: analysis.lang,
            title: analysis.signals.title.clone(),
            meta_description: analysis.signals.meta_description.clone(),
            h1_count: analysis.signals.h1_count,
            h2_count: analysis.signals.h2_count,
            total_images: analysis.signals.total_images,
            images_without_alt: analysis.signals.images_without_alt,
            has_viewport: analysis.signals.has_viewport,
            has_canonical: analysis.signals.has_canonical,
            global_score: analysis.scores.global,
            mobile_score: analysis.scores.mobile,
            desktop_score: analysis.scores.desktop,
            ai_analysis: analysis.narrative.clone(),
            created_at: analysis.analyzed_at,
        }
    }
}
