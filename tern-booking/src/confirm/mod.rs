//! Reservation confirmation
//!
//! The strictest contract in the pipeline: submit the confirm request and
//! deterministically produce a valid [`ReservationConfirmation`] or fail
//! loudly. A thrown error is the only way a non-confirmed state reaches the
//! caller - there is no partial-success state.

pub mod normalize;

pub use normalize::normalize_confirmation;

use crate::live::{LiveBookingRequest, WIDGET_BOOKING_LIVE};
use crate::transport::FunctionsClient;
use serde_json::Value;
use shared::models::{ConfirmRequest, ReservationConfirmation};
use shared::{BookingError, BookingResult, ErrorCode};
use validator::Validate;

/// One initial attempt plus one bounded retry on transient transport
/// failures (same idempotency key, so the server deduplicates)
const MAX_ATTEMPTS: u32 = 2;

/// Finalize a hold into a confirmed reservation.
///
/// The idempotency key must be stable per logical user action: regenerated
/// for a new booking attempt, reused across retries of the same attempt.
pub async fn confirm_reservation(
    functions: &FunctionsClient,
    tenant_id: &str,
    request: &ConfirmRequest,
    idempotency_key: &str,
) -> BookingResult<ReservationConfirmation> {
    let live = LiveBookingRequest::Confirm {
        tenant_id: tenant_id.to_string(),
        confirm: request.clone(),
        idempotency_key: idempotency_key.to_string(),
    };
    let body = serde_json::to_value(&live).map_err(|e| {
        BookingError::with_message(ErrorCode::ReservationConfirmationFailed, e.to_string())
    })?;

    let payload = invoke_with_retry(functions, &body, idempotency_key)
        .await
        .map_err(|e| e.wrap(ErrorCode::ReservationConfirmationFailed))?;

    finalize_confirmation(payload)
}

async fn invoke_with_retry(
    functions: &FunctionsClient,
    body: &Value,
    idempotency_key: &str,
) -> BookingResult<Value> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match functions
            .invoke_with_idempotency(WIDGET_BOOKING_LIVE, body, Some(idempotency_key))
            .await
        {
            Ok(payload) => return Ok(payload),
            Err(err) if attempt < MAX_ATTEMPTS && is_retryable(&err) => {
                tracing::warn!(
                    code = err.code.as_str(),
                    attempt,
                    "Confirm attempt failed, retrying with same idempotency key"
                );
            }
            Err(err) => return Err(err),
        }
    }
}

/// Only transient transport failures are retried; deterministic failures
/// (4xx, parse errors, embedded API errors) surface immediately
fn is_retryable(err: &BookingError) -> bool {
    match err.code {
        ErrorCode::NetworkError => true,
        ErrorCode::HttpError => err
            .details
            .as_ref()
            .and_then(|d| d.get("status"))
            .and_then(Value::as_u64)
            .is_some_and(|status| status >= 500),
        _ => false,
    }
}

/// The post-transport half of the pipeline, pure over the payload:
/// unwrap, reject embedded errors, reject empty success, normalize,
/// validate, enforce the reservation-id invariant.
pub fn finalize_confirmation(payload: Value) -> BookingResult<ReservationConfirmation> {
    // Unwrap a single `data` wrapper, exactly once
    let inner = match payload.get("data") {
        Some(data) => data.clone(),
        None => payload,
    };

    if let Some(error) = inner.get("error") {
        if !error.is_null() {
            return Err(BookingError::new(ErrorCode::EdgeFunctionError)
                .with_detail("error", error.clone()));
        }
    }

    // An empty success is never valid; this guards against a server bug
    // returning HTTP 200 with no body
    if inner.as_object().is_some_and(|obj| obj.is_empty()) {
        return Err(BookingError::new(ErrorCode::EmptyResponse));
    }

    let confirmation = normalize_confirmation(&inner)?;

    confirmation.validate().map_err(|issues| {
        BookingError::new(ErrorCode::SchemaValidationFailed)
            .with_detail("issues", serde_json::to_value(&issues).unwrap_or(Value::Null))
    })?;

    // Final, non-negotiable invariant
    if confirmation.reservation_id.trim().is_empty() {
        return Err(BookingError::new(ErrorCode::BookingCreationFailed));
    }

    Ok(confirmation)
}
