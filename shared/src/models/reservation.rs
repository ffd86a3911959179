//! Reservation confirmation model
//!
//! [`ReservationConfirmation`] is the canonical post-booking record. Its
//! invariant is strict: `reservation_id` must be a non-empty string after
//! normalization - a "successful" confirm that produced no identifiable
//! reservation is a failure, never a degraded success.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Canonical reservation status
///
/// Upstream payloads carry free-form status strings; anything outside this
/// set is coerced to `Pending` so unknown states route to human moderation
/// instead of silently appearing confirmed to the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Waitlisted,
}

impl ReservationStatus {
    /// Coerce an upstream status string into the canonical set.
    ///
    /// Matching is case-insensitive; returns `None` for values outside the
    /// set so the caller can decide how loudly to downgrade.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "confirmed" => Some(Self::Confirmed),
            "pending" => Some(Self::Pending),
            "waitlisted" => Some(Self::Waitlisted),
            _ => None,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Pending => write!(f, "pending"),
            Self::Waitlisted => write!(f, "waitlisted"),
        }
    }
}

/// Human-facing booking summary attached to a confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReservationSummary {
    /// Reservation date, ISO-8601 with milliseconds
    #[validate(length(min = 1))]
    pub date: String,
    /// Display time ("HH:MM"), derived from the date when parseable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub party_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
}

/// The canonical post-booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReservationConfirmation {
    /// Required, non-empty. Absence is a hard failure upstream of this type.
    #[validate(length(min = 1))]
    pub reservation_id: String,
    /// Human-shown code; synthesized from the id when upstream omits it
    #[validate(length(min = 1))]
    pub confirmation_number: String,
    pub status: ReservationStatus,
    #[validate(nested)]
    pub summary: ReservationSummary,
}

/// Guest details submitted with a confirm request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Confirm request (finalizes a hold into a reservation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub hold_id: String,
    pub guest: GuestDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_intent_id: Option<String>,
    /// Booking channel ("widget", "dashboard", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Payment intent handle for deposit-backed bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositIntent {
    pub client_secret: String,
}
