//! Booking error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Booking pipeline error with structured error code and details
///
/// This is the primary error type for the Tern framework, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (correlation id, endpoint, request echo)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct BookingError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (status, correlation id, field issues, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl BookingError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Attach the correlation id of the request that produced this error
    pub fn with_correlation_id(self, correlation_id: impl Into<String>) -> Self {
        self.with_detail("correlation_id", correlation_id.into())
    }

    /// Re-wrap an underlying error under a new code, preserving its
    /// code/message/details as context
    pub fn wrap(self, code: ErrorCode) -> Self {
        let mut wrapped = BookingError::new(code)
            .with_detail("cause_code", self.code.as_str())
            .with_detail("cause", self.message.clone());
        if let Some(details) = self.details {
            for (k, v) in details {
                wrapped = wrapped.with_detail(k, v);
            }
        }
        wrapped
    }

    // ==================== Convenience constructors ====================

    /// Create an HTTP error carrying the response status
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::HttpError, msg).with_detail("status", status)
    }

    /// Create a parse error carrying the raw response text
    pub fn parse(raw: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError).with_detail("raw", raw.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create a tenant-not-found error for a slug
    pub fn tenant_not_found(slug: impl Into<String>) -> Self {
        let s = slug.into();
        Self::with_message(ErrorCode::TenantNotFound, format!("No tenant for slug '{s}'"))
            .with_detail("slug", s)
    }
}

/// Type alias for Result with BookingError
pub type BookingResult<T> = Result<T, BookingError>;
