//! Hold Model
//!
//! A hold is a short-lived reservation lock: created from a chosen slot and
//! party size, identified by a server-issued id. A confirm request must
//! reference an unexpired hold to succeed.

use serde::{Deserialize, Serialize};

/// Request to lock a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldRequest {
    pub tenant_id: String,
    /// Chosen slot start, ISO-8601
    pub slot_time: String,
    pub party_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
}

/// Server-issued reservation lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub hold_id: String,
    /// Expiry, ISO-8601 (server policy; absent means server default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub slot_time: String,
    #[serde(default)]
    pub party_size: u32,
}
