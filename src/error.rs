//! Error types for the SEO audit service.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for pipeline operations
//! - `ErrorBody`: The flat JSON error shape returned to callers
//! - `Result<T>`: Type alias for Results using AppError

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for pipeline operations.
///
/// Only the input and fetch variants ever reach the caller; everything
/// downstream of a successful fetch degrades instead of failing.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body carried no URL
    #[error("URL is required")]
    MissingUrl,

    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request to the target origin failed
    #[error("Failed to fetch {url}")]
    FetchFailed {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// Target origin answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error maps to. Input errors are the caller's
    /// fault; everything else collapses to a server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingUrl | AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying detail string, where one exists beyond the message.
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::FetchFailed { source, .. } => Some(format!("{source:#}")),
            AppError::FetchStatus { status, .. } => Some(format!("upstream status {status}")),
            AppError::Other(e) => Some(format!("{e:#}")),
            _ => None,
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// HTTP ERROR RESPONSE
// ============================================================================

/// Flat error payload: `{ "error": "...", "details": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            details: self.details(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
