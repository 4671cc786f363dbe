//! Error types for policy validation and configuration loading.

use actix_web::{ResponseError, http::StatusCode};

/// Raised while serializing a header from the effective configuration.
///
/// Always fatal to the request being processed: the middleware returns it
/// to the caller instead of the response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{header}: max-age must be a non-negative number, got {value}")]
    InvalidMaxAge { header: &'static str, value: i64 },

    #[error("Referrer-Policy must contain at least one policy")]
    EmptyReferrerPolicy,

    #[error("{header}: {value:?} is not a valid header value")]
    InvalidHeaderValue { header: &'static str, value: String },
}

impl ResponseError for ValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Raised while building a configuration from JSON or the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid policy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
