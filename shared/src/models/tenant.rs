//! Tenant Info Model

use serde::{Deserialize, Serialize};

/// Resolved restaurant identity (fetched once per widget session)
///
/// Both resolution paths (public widget-token path and authenticated
/// directory path) normalize into this exact shape; callers never observe
/// which path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantInfo {
    pub tenant_id: String,
    /// Human-readable unique key (widget routes address tenants by slug)
    pub slug: String,
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Ordered per-weekday open/close windows
    #[serde(default)]
    pub business_hours: Vec<BusinessHoursWindow>,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default)]
    pub features: TenantFeatures,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// One open/close window for a weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHoursWindow {
    /// Weekday, 0 = Monday .. 6 = Sunday
    pub weekday: u8,
    /// Opening time, "HH:MM"
    pub open: String,
    /// Closing time, "HH:MM"
    pub close: String,
}

/// Widget branding colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default = "default_primary")]
    pub primary_color: String,
    #[serde(default = "default_secondary")]
    pub secondary_color: String,
}

fn default_primary() -> String {
    "#1a1a2e".to_string()
}

fn default_secondary() -> String {
    "#e94560".to_string()
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            primary_color: default_primary(),
            secondary_color: default_secondary(),
        }
    }
}

/// Feature flags carried on the tenant record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantFeatures {
    #[serde(default)]
    pub deposits_enabled: bool,
    #[serde(default)]
    pub revenue_optimization: bool,
}
