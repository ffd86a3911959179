//! Tern Booking - client for the reservation remote-function API
//!
//! Drives the booking confirmation pipeline: tenant resolution,
//! availability search, hold creation, and idempotency-guarded reservation
//! confirmation with strict response normalization.

pub mod analytics;
pub mod auth;
pub mod availability;
pub mod config;
pub mod confirm;
pub mod deposit;
pub mod hold;
pub mod live;
pub mod tenant;
pub mod transport;

pub use auth::{AccessTokenChain, AuthSession, SessionStore, TokenResolver};
pub use config::{ClientConfig, Environment};
pub use confirm::confirm_reservation;
pub use tenant::{TenantDirectory, TenantResolver};
pub use transport::FunctionsClient;

// Re-export shared types for convenience
pub use shared::{BookingError, BookingResult, ErrorCode};
