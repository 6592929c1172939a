//! # API Error Type
//!
//! Unified error type for back-office commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function  →  Result<T, ApiError>                               │
//! │                                                                         │
//! │  permission check fails ─────────────────────────► FORBIDDEN            │
//! │  StoreError::NotFound ───────────────────────────► NOT_FOUND            │
//! │  StoreError::ReferentialIntegrity ───────────────► REFERENTIAL_INTEGRITY│
//! │  StoreError::Validation / CoreError ─────────────► VALIDATION_ERROR     │
//! │  InsightsError ──────────────────────────────────► EXTERNAL_SERVICE     │
//! │                                                                         │
//! │  Front-end receives:                                                    │
//! │    { "code": "REFERENTIAL_INTEGRITY",                                   │
//! │      "message": "Cannot delete role 'manager': role is assigned..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::CoreError;
use tally_insights::InsightsError;
use tally_store::StoreError;
use tracing::error;

use crate::config::ConfigError;

/// What the front-end receives when a command fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    /// A delete blocked by records that still reference the target.
    ReferentialIntegrity,
    /// A rule of the domain, such as voiding a voided sale.
    BusinessLogic,
    Forbidden,
    Unauthenticated,
    NotImplemented,
    /// The insights proxy failed or was unreachable.
    ExternalService,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn forbidden(permission: &str) -> Self {
        ApiError::new(
            ErrorCode::Forbidden,
            format!("Missing permission: {permission}"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::NotFound { .. } => ErrorCode::NotFound,
            StoreError::ReferentialIntegrity { .. } => ErrorCode::ReferentialIntegrity,
            StoreError::UnknownReference { .. } | StoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
            StoreError::SelfDeletion
            | StoreError::AppendOnly { .. }
            | StoreError::InvalidSaleStatus { .. } => ErrorCode::BusinessLogic,
            StoreError::NotImplemented(_) => ErrorCode::NotImplemented,
            StoreError::Unauthenticated(_) => ErrorCode::Unauthenticated,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<InsightsError> for ApiError {
    fn from(err: InsightsError) -> Self {
        match &err {
            InsightsError::InvalidConfig(_) => {
                error!("Insights misconfigured: {}", err);
                ApiError::internal(err.to_string())
            }
            _ => ApiError::new(ErrorCode::ExternalService, err.user_message()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        error!("Configuration error: {}", err);
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
