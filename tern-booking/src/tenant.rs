//! Tenant resolution
//!
//! Maps a public slug to a canonical [`TenantInfo`]. Two paths exist: the
//! public widget path goes through the remote function transport with the
//! widget access token; the authenticated dashboard path queries the tenant
//! store directly and merges business hours in. Callers never observe which
//! path ran - both normalize into the same shape.

use crate::transport::FunctionsClient;
use async_trait::async_trait;
use serde_json::{Value, json};
use shared::models::{Branding, BusinessHoursWindow, TenantFeatures, TenantInfo};
use shared::{BookingError, BookingResult, ErrorCode};
use std::sync::Arc;

/// Raw tenant row as the directory stores it (hours live elsewhere)
#[derive(Debug, Clone)]
pub struct TenantRecord {
    pub tenant_id: String,
    pub slug: String,
    pub name: String,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub branding: Option<Branding>,
    pub features: Option<TenantFeatures>,
}

/// Direct tenant store access (dashboard/authenticated context)
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn tenant_by_slug(&self, slug: &str) -> BookingResult<Option<TenantRecord>>;

    async fn business_hours(&self, tenant_id: &str) -> BookingResult<Vec<BusinessHoursWindow>>;
}

/// Resolves slugs into canonical tenant records
pub struct TenantResolver {
    functions: FunctionsClient,
    directory: Option<Arc<dyn TenantDirectory>>,
}

impl TenantResolver {
    pub fn new(functions: FunctionsClient) -> Self {
        Self {
            functions,
            directory: None,
        }
    }

    /// Attach a direct store for the authenticated path
    pub fn with_directory(mut self, directory: Arc<dyn TenantDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Resolve a slug into a [`TenantInfo`].
    ///
    /// A widget access token selects the public transport path; without one
    /// the directory is queried directly.
    pub async fn resolve(
        &self,
        slug: &str,
        widget_token: Option<&str>,
    ) -> BookingResult<TenantInfo> {
        let result = match (widget_token, &self.directory) {
            (Some(token), _) => self.resolve_public(slug, token).await,
            (None, Some(directory)) => self.resolve_direct(directory.as_ref(), slug).await,
            (None, None) => Err(BookingError::with_message(
                ErrorCode::TenantLookupFailed,
                "No widget token and no tenant directory configured",
            )),
        };

        result.map_err(|err| {
            if err.code == ErrorCode::TenantNotFound {
                err
            } else if err.code == ErrorCode::TenantLookupFailed {
                err.with_detail("slug", slug)
            } else {
                err.wrap(ErrorCode::TenantLookupFailed)
                    .with_detail("slug", slug)
            }
        })
    }

    async fn resolve_public(&self, slug: &str, token: &str) -> BookingResult<TenantInfo> {
        let payload = self
            .functions
            .invoke("tenant", &json!({ "slug": slug, "token": token }))
            .await?;

        let inner = payload.get("data").cloned().unwrap_or(payload);
        normalize_tenant(&inner).ok_or_else(|| BookingError::tenant_not_found(slug))
    }

    async fn resolve_direct(
        &self,
        directory: &dyn TenantDirectory,
        slug: &str,
    ) -> BookingResult<TenantInfo> {
        let record = directory
            .tenant_by_slug(slug)
            .await?
            .ok_or_else(|| BookingError::tenant_not_found(slug))?;

        let business_hours = directory.business_hours(&record.tenant_id).await?;

        Ok(TenantInfo {
            tenant_id: record.tenant_id,
            slug: record.slug,
            name: record.name,
            timezone: record.timezone.unwrap_or_else(|| "UTC".to_string()),
            currency: record.currency.unwrap_or_else(|| "EUR".to_string()),
            business_hours,
            branding: record.branding.unwrap_or_default(),
            features: record.features.unwrap_or_default(),
        })
    }
}

/// Normalize a public-path tenant payload into the canonical shape.
///
/// Returns `None` when the payload carries no usable tenant identity.
fn normalize_tenant(payload: &Value) -> Option<TenantInfo> {
    let obj = payload.as_object()?;

    let tenant_id = obj
        .get("tenant_id")
        .or_else(|| obj.get("id"))
        .and_then(Value::as_str)?
        .to_string();
    let slug = obj.get("slug").and_then(Value::as_str)?.to_string();
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(&slug)
        .to_string();

    let business_hours = obj
        .get("business_hours")
        .cloned()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .unwrap_or_default();
    let branding = obj
        .get("branding")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();
    let features = obj
        .get("features")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    Some(TenantInfo {
        tenant_id,
        slug,
        name,
        timezone: obj
            .get("timezone")
            .and_then(Value::as_str)
            .unwrap_or("UTC")
            .to_string(),
        currency: obj
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or("EUR")
            .to_string(),
        business_hours,
        branding,
        features,
    })
}
