//! Confirm response normalization
//!
//! The backend has accumulated several historical field-name aliases for
//! the same concepts, so the confirm payload is normalized through explicit
//! alias-priority lists, one per field. The function is pure and total
//! except for one hard rule: a payload with no reservation id under any
//! alias fails with `MISSING_RESERVATION_ID` instead of producing a partial
//! record - downstream code must never mistake a malformed payload for a
//! real booking.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use shared::models::{ReservationConfirmation, ReservationStatus, ReservationSummary};
use shared::{BookingError, BookingResult, ErrorCode};

const RESERVATION_ID_ALIASES: &[&str] = &["reservation_id", "reservationId", "id", "booking_id"];
const STATUS_ALIASES: &[&str] = &["status", "reservation_status", "state"];
const CONFIRMATION_NUMBER_ALIASES: &[&str] =
    &["confirmation_number", "confirmationNumber", "confirmation_code"];
const DATE_ALIASES: &[&str] = &["date", "reservation_date", "service_date"];
const TIME_ALIASES: &[&str] = &["time", "reservation_time"];
const PARTY_SIZE_ALIASES: &[&str] = &["party_size", "partySize", "guests", "covers"];
const TABLE_ALIASES: &[&str] = &["table_info", "table_number", "table"];

/// Normalize a confirm payload into the canonical confirmation record
pub fn normalize_confirmation(payload: &Value) -> BookingResult<ReservationConfirmation> {
    let reservation_id = first_string(payload, RESERVATION_ID_ALIASES)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            BookingError::new(ErrorCode::MissingReservationId)
                .with_detail("aliases_checked", RESERVATION_ID_ALIASES.join(", "))
        })?;

    let status = normalize_status(payload);
    let confirmation_number = first_string(payload, CONFIRMATION_NUMBER_ALIASES)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| synthesize_confirmation_number(&reservation_id));

    // Summary fields may live nested under `summary` or flat on the payload
    let summary_obj = payload.get("summary").filter(|v| v.is_object());
    let (date, derived_time) = normalize_date(summary_obj.unwrap_or(payload));
    let time = summary_obj
        .and_then(|s| first_string(s, TIME_ALIASES))
        .or_else(|| first_string(payload, TIME_ALIASES))
        .or(derived_time);

    let party_size = summary_obj
        .and_then(|s| first_number(s, PARTY_SIZE_ALIASES))
        .or_else(|| first_number(payload, PARTY_SIZE_ALIASES))
        .unwrap_or(0);

    let table_info = summary_obj
        .and_then(|s| first_string(s, TABLE_ALIASES))
        .or_else(|| first_string(payload, TABLE_ALIASES));

    let deposit_required = summary_obj
        .and_then(|s| s.get("deposit_required"))
        .or_else(|| payload.get("deposit_required"))
        .and_then(Value::as_bool);
    let deposit_amount = summary_obj
        .and_then(|s| s.get("deposit_amount"))
        .or_else(|| payload.get("deposit_amount"))
        .and_then(as_f64);

    Ok(ReservationConfirmation {
        reservation_id,
        confirmation_number,
        status,
        summary: ReservationSummary {
            date,
            time,
            party_size,
            table_info,
            deposit_required,
            deposit_amount,
        },
    })
}

/// First alias present as a string (numbers are accepted and stringified)
fn first_string(payload: &Value, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        match payload.get(alias) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => continue,
        }
    }
    None
}

/// First alias coercible to a non-negative integer; never NaN
fn first_number(payload: &Value, aliases: &[&str]) -> Option<u32> {
    for alias in aliases {
        match payload.get(alias) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_u64() {
                    return Some(v.min(u32::MAX as u64) as u32);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<u32>() {
                    return Some(v);
                }
            }
            _ => continue,
        }
    }
    None
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lowercase and coerce the upstream status; anything outside the canonical
/// set routes to `pending` so unknown states reach human moderation.
fn normalize_status(payload: &Value) -> ReservationStatus {
    match first_string(payload, STATUS_ALIASES) {
        Some(raw) => ReservationStatus::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(status = %raw, "Unrecognized reservation status, coercing to pending");
            ReservationStatus::Pending
        }),
        None => ReservationStatus::Pending,
    }
}

/// `CONF` + last six characters of the reservation id, uppercased
fn synthesize_confirmation_number(reservation_id: &str) -> String {
    let tail: String = reservation_id
        .chars()
        .rev()
        .take(6)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("CONF{}", tail.to_uppercase())
}

/// Extract and re-express the reservation date as ISO-8601 with
/// milliseconds, deriving an "HH:MM" display time when the raw value
/// carried one. Unparseable dates fall back to now - timestamp display is
/// lower-stakes than the presence of the reservation id.
fn normalize_date(payload: &Value) -> (String, Option<String>) {
    if let Some(raw) = first_string(payload, DATE_ALIASES) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            let utc = parsed.with_timezone(&Utc);
            return (iso_millis(&utc), Some(utc.format("%H:%M").to_string()));
        }
        if let Ok(day) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            let utc = day.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
            return (iso_millis(&utc), None);
        }
        tracing::warn!(date = %raw, "Unparseable reservation date, falling back to now");
    }
    (iso_millis(&Utc::now()), None)
}

fn iso_millis(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
