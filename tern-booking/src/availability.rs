//! Availability search

use crate::live::{LiveBookingRequest, WIDGET_BOOKING_LIVE};
use crate::transport::FunctionsClient;
use shared::models::{AvailabilityResponse, AvailabilitySearchRequest};
use shared::{BookingError, BookingResult, ErrorCode};

/// Search bookable slots for a party size and service date.
///
/// Any underlying failure is re-wrapped as `AVAILABILITY_SEARCH_FAILED`
/// with the cause preserved in details.
pub async fn search_availability(
    functions: &FunctionsClient,
    tenant_id: &str,
    query: &AvailabilitySearchRequest,
) -> BookingResult<AvailabilityResponse> {
    let request = LiveBookingRequest::Search {
        tenant_id: tenant_id.to_string(),
        query: query.clone(),
    };
    let body = serde_json::to_value(&request).map_err(|e| {
        BookingError::with_message(ErrorCode::AvailabilitySearchFailed, e.to_string())
    })?;

    let payload = functions
        .invoke(WIDGET_BOOKING_LIVE, &body)
        .await
        .map_err(|e| e.wrap(ErrorCode::AvailabilitySearchFailed))?;

    let inner = payload.get("data").cloned().unwrap_or(payload);
    serde_json::from_value(inner).map_err(|e| {
        BookingError::with_message(
            ErrorCode::AvailabilitySearchFailed,
            format!("Malformed availability response: {e}"),
        )
    })
}
