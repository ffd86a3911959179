//! Shared types for the Tern booking framework
//!
//! Common types used across multiple crates: the canonical booking data
//! model, the unified error system, and utility helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{BookingError, BookingResult, ErrorCode};
pub use models::{
    AvailabilityResponse, AvailabilitySearchRequest, AvailabilitySlot, Branding,
    BusinessHoursWindow, ConfirmRequest, DepositIntent, GuestDetails, Hold, HoldRequest,
    ReservationConfirmation, ReservationStatus, ReservationSummary, TenantFeatures, TenantInfo,
    TimeWindow,
};
