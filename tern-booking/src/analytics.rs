//! Best-effort conversion analytics
//!
//! Analytics submission must never disrupt the user flow: every failure is
//! swallowed with a warning.

use crate::transport::FunctionsClient;
use serde::Serialize;

/// Conversion-style event emitted after a completed booking
#[derive(Debug, Clone, Serialize)]
pub struct ConversionEvent {
    pub tenant_id: String,
    pub event: String,
    pub reservation_id: Option<String>,
    pub correlation_id: Option<String>,
}

/// Submit a conversion event, fire-and-forget
pub async fn track_conversion(functions: &FunctionsClient, event: &ConversionEvent) {
    let body = match serde_json::to_value(event) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to serialize conversion event: {e}");
            return;
        }
    };

    if let Err(e) = functions.invoke("widget-analytics", &body).await {
        tracing::warn!(code = e.code.as_str(), "Conversion event dropped: {e}");
    }
}
