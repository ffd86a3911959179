//! Live booking endpoint request union
//!
//! The backend multiplexes availability search, hold creation, and
//! reservation confirmation through one remote function, discriminated by
//! an `action` field. The union keeps one typed request per variant instead
//! of free-form maps.

use serde::Serialize;
use shared::models::{AvailabilitySearchRequest, ConfirmRequest, HoldRequest};

/// Remote function multiplexing the booking actions
pub const WIDGET_BOOKING_LIVE: &str = "widget-booking-live";

/// Tagged request union for the live booking endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LiveBookingRequest {
    Search {
        tenant_id: String,
        #[serde(flatten)]
        query: AvailabilitySearchRequest,
    },
    Hold {
        #[serde(flatten)]
        hold: HoldRequest,
        idempotency_key: String,
    },
    Confirm {
        tenant_id: String,
        #[serde(flatten)]
        confirm: ConfirmRequest,
        idempotency_key: String,
    },
}
