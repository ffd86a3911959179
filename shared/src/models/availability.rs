//! Availability search types (read-only, recomputed per search)

use serde::{Deserialize, Serialize};

/// Availability query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySearchRequest {
    pub party_size: u32,
    /// Service date, ISO "YYYY-MM-DD"
    pub service_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
}

/// Bounds of a search, "HH:MM" local to the tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

/// One bookable slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Slot start, ISO-8601
    pub slot_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Search result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
}
