//! Canonical booking data model

pub mod availability;
pub mod hold;
pub mod reservation;
pub mod tenant;

pub use availability::{
    AvailabilityResponse, AvailabilitySearchRequest, AvailabilitySlot, TimeWindow,
};
pub use hold::{Hold, HoldRequest};
pub use reservation::{
    ConfirmRequest, DepositIntent, GuestDetails, ReservationConfirmation, ReservationStatus,
    ReservationSummary,
};
pub use tenant::{Branding, BusinessHoursWindow, TenantFeatures, TenantInfo};
