//! Error types shared across services and handlers
//!
//! Services return `ApiError`; handlers convert it into the
//! `(StatusCode, Json<ErrorResponse>)` tuple axum expects. Upstream
//! failures (database, chain) are logged with detail and surfaced to the
//! client as an opaque internal error.

use axum::{http::StatusCode, Json};
use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    InvalidAddress,
    NotFound(&'static str),
    DuplicateToken,
    DuplicateHash,
    Upstream(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::InvalidAddress => write!(f, "Invalid Ethereum address"),
            ApiError::NotFound(what) => write!(f, "{} not found", what),
            ApiError::DuplicateToken => {
                write!(f, "Metadata already exists for this token ID")
            }
            ApiError::DuplicateHash => {
                write!(f, "Transaction with this hash already exists")
            }
            ApiError::Upstream(detail) => write!(f, "upstream failure: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidAddress => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateToken | ApiError::DuplicateHash => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert into the rejection tuple used by handlers. Upstream detail
    /// stays in the server log.
    pub fn into_rejection(self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.status();
        let message = match &self {
            ApiError::Upstream(detail) => {
                tracing::error!("request failed: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (
            status,
            Json(ErrorResponse {
                status: "error".to_string(),
                message,
            }),
        )
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        ApiError::Upstream(format!("database error: {}", err))
    }
}

/// Map an insert error to the duplicate-kind error when the database
/// reports a unique-constraint violation, otherwise to `Upstream`. The
/// unique index is the final arbiter for concurrent writers that both
/// passed the existence pre-check.
pub fn map_unique_violation(err: DbErr, duplicate: ApiError) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate,
        _ => err.into(),
    }
}
