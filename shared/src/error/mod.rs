//! Unified error system for the Tern booking framework
//!
//! This module provides the error handling used across the booking pipeline
//! and the widget protocol:
//! - [`ErrorCode`]: standardized error codes for every failure mode
//! - [`BookingError`]: rich error type with code, message, and details
//!
//! # Error Code Groups
//!
//! - Transport: `HTTP_ERROR`, `PARSE_ERROR`, `API_ERROR`, `NO_DATA`, `NETWORK_ERROR`
//! - Tenant resolution: `TENANT_LOOKUP_FAILED`, `TENANT_NOT_FOUND`
//! - Booking steps: `AVAILABILITY_SEARCH_FAILED`, `HOLD_CREATION_FAILED`
//! - Confirmation pipeline: `EDGE_FUNCTION_ERROR`, `EMPTY_RESPONSE`,
//!   `MISSING_RESERVATION_ID`, `SCHEMA_VALIDATION_FAILED`,
//!   `BOOKING_CREATION_FAILED`, `RESERVATION_CONFIRMATION_FAILED`
//!
//! # Example
//!
//! ```
//! use shared::error::{BookingError, ErrorCode};
//!
//! // Create a simple error
//! let err = BookingError::new(ErrorCode::EmptyResponse);
//!
//! // Create an error with a custom message and details
//! let err = BookingError::with_message(ErrorCode::HttpError, "confirm returned 502")
//!     .with_detail("status", 502)
//!     .with_detail("endpoint", "widget-booking-live");
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{BookingError, BookingResult};
