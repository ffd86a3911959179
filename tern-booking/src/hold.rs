//! Hold creation

use crate::live::{LiveBookingRequest, WIDGET_BOOKING_LIVE};
use crate::transport::FunctionsClient;
use shared::models::{Hold, HoldRequest};
use shared::{BookingError, BookingResult, ErrorCode};

/// Lock a slot ahead of confirmation.
///
/// The idempotency key is caller-supplied and must be stable across retries
/// of the same user intent, so retried hold requests do not create
/// duplicate locks. Failures are re-wrapped as `HOLD_CREATION_FAILED`.
pub async fn create_hold(
    functions: &FunctionsClient,
    request: &HoldRequest,
    idempotency_key: &str,
) -> BookingResult<Hold> {
    let live = LiveBookingRequest::Hold {
        hold: request.clone(),
        idempotency_key: idempotency_key.to_string(),
    };
    let body = serde_json::to_value(&live)
        .map_err(|e| BookingError::with_message(ErrorCode::HoldCreationFailed, e.to_string()))?;

    let payload = functions
        .invoke_with_idempotency(WIDGET_BOOKING_LIVE, &body, Some(idempotency_key))
        .await
        .map_err(|e| e.wrap(ErrorCode::HoldCreationFailed))?;

    let inner = payload.get("data").cloned().unwrap_or(payload);
    serde_json::from_value(inner).map_err(|e| {
        BookingError::with_message(
            ErrorCode::HoldCreationFailed,
            format!("Malformed hold response: {e}"),
        )
    })
}
