//! Error codes for the booking pipeline and widget protocol
//!
//! Codes are serialized as their stable string identifiers so that the
//! dashboard, the widget, and server logs all speak the same vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Each variant carries a stable string identifier (the wire form) and a
/// developer-facing default message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ErrorCode {
    // ==================== Transport ====================
    /// Remote function returned a non-2xx HTTP status
    HttpError,
    /// Response body could not be parsed as JSON
    ParseError,
    /// Response body carried `{ success: false, error: {...} }`
    ApiError,
    /// Response body parsed to null
    NoData,
    /// DNS/connect/timeout failure before a response arrived
    NetworkError,

    // ==================== Tenant Resolution ====================
    /// Tenant lookup failed (transport or store error)
    TenantLookupFailed,
    /// Slug matched no tenant record
    TenantNotFound,

    // ==================== Booking Steps ====================
    /// Availability search failed
    AvailabilitySearchFailed,
    /// Hold creation failed
    HoldCreationFailed,

    // ==================== Confirmation Pipeline ====================
    /// Confirm payload carried an embedded error field
    EdgeFunctionError,
    /// Confirm payload was a structurally empty object
    EmptyResponse,
    /// No reservation id alias present in the confirm payload
    MissingReservationId,
    /// Normalized confirmation failed schema validation
    SchemaValidationFailed,
    /// Confirmation completed without an identifiable reservation
    BookingCreationFailed,
    /// Confirm call failed at the transport layer
    ReservationConfirmationFailed,
}

impl ErrorCode {
    /// Stable string identifier for this code (the wire form)
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::HttpError => "HTTP_ERROR",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::NoData => "NO_DATA",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::TenantLookupFailed => "TENANT_LOOKUP_FAILED",
            ErrorCode::TenantNotFound => "TENANT_NOT_FOUND",
            ErrorCode::AvailabilitySearchFailed => "AVAILABILITY_SEARCH_FAILED",
            ErrorCode::HoldCreationFailed => "HOLD_CREATION_FAILED",
            ErrorCode::EdgeFunctionError => "EDGE_FUNCTION_ERROR",
            ErrorCode::EmptyResponse => "EMPTY_RESPONSE",
            ErrorCode::MissingReservationId => "MISSING_RESERVATION_ID",
            ErrorCode::SchemaValidationFailed => "SCHEMA_VALIDATION_FAILED",
            ErrorCode::BookingCreationFailed => "BOOKING_CREATION_FAILED",
            ErrorCode::ReservationConfirmationFailed => "RESERVATION_CONFIRMATION_FAILED",
        }
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::HttpError => "Remote function returned an HTTP error",
            ErrorCode::ParseError => "Response body is not valid JSON",
            ErrorCode::ApiError => "Remote function reported an error",
            ErrorCode::NoData => "Remote function returned no data",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TenantLookupFailed => "Tenant lookup failed",
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::AvailabilitySearchFailed => "Availability search failed",
            ErrorCode::HoldCreationFailed => "Hold creation failed",
            ErrorCode::EdgeFunctionError => "Edge function reported an error",
            ErrorCode::EmptyResponse => "Confirm endpoint returned an empty response",
            ErrorCode::MissingReservationId => "Confirm payload carries no reservation id",
            ErrorCode::SchemaValidationFailed => "Confirmation failed schema validation",
            ErrorCode::BookingCreationFailed => "Booking completed without a reservation id",
            ErrorCode::ReservationConfirmationFailed => "Reservation confirmation failed",
        }
    }

    /// Map a wire identifier back to a code, if it names a known one
    pub fn parse(value: &str) -> Option<Self> {
        let code = match value {
            "HTTP_ERROR" => ErrorCode::HttpError,
            "PARSE_ERROR" => ErrorCode::ParseError,
            "API_ERROR" => ErrorCode::ApiError,
            "NO_DATA" => ErrorCode::NoData,
            "NETWORK_ERROR" => ErrorCode::NetworkError,
            "TENANT_LOOKUP_FAILED" => ErrorCode::TenantLookupFailed,
            "TENANT_NOT_FOUND" => ErrorCode::TenantNotFound,
            "AVAILABILITY_SEARCH_FAILED" => ErrorCode::AvailabilitySearchFailed,
            "HOLD_CREATION_FAILED" => ErrorCode::HoldCreationFailed,
            "EDGE_FUNCTION_ERROR" => ErrorCode::EdgeFunctionError,
            "EMPTY_RESPONSE" => ErrorCode::EmptyResponse,
            "MISSING_RESERVATION_ID" => ErrorCode::MissingReservationId,
            "SCHEMA_VALIDATION_FAILED" => ErrorCode::SchemaValidationFailed,
            "BOOKING_CREATION_FAILED" => ErrorCode::BookingCreationFailed,
            "RESERVATION_CONFIRMATION_FAILED" => ErrorCode::ReservationConfirmationFailed,
            _ => return None,
        };
        Some(code)
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

/// Error when converting an unknown identifier to an [`ErrorCode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidErrorCode(pub String);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<String> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ErrorCode::parse(&value).ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
