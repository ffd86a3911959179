// tern-booking/examples/booking_demo.rs
// End-to-end booking flow against a live backend

use tern_booking::tenant::TenantResolver;
use tern_booking::{ClientConfig, availability, confirm, hold};

use shared::models::{AvailabilitySearchRequest, ConfirmRequest, GuestDetails, HoldRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <slug> <widget_token> [service_date]", args[0]);
        println!("  Example: {} mariscos wt_abc123 2025-06-01", args[0]);
        return Ok(());
    }

    let slug = &args[1];
    let widget_token = &args[2];
    let service_date = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| "2025-06-01".to_string());

    let base_url =
        std::env::var("TERN_BASE_URL").unwrap_or_else(|_| "http://localhost:54321".to_string());
    let anon_key = std::env::var("TERN_ANON_KEY").unwrap_or_else(|_| "anon".to_string());

    let functions = ClientConfig::new(base_url, anon_key).build_functions_client();

    // Tenant resolution (public widget path)
    let resolver = TenantResolver::new(functions.clone());
    let tenant = resolver.resolve(slug, Some(widget_token.as_str())).await?;
    tracing::info!(tenant_id = %tenant.tenant_id, name = %tenant.name, "Tenant resolved");

    // Availability search
    let response = availability::search_availability(
        &functions,
        &tenant.tenant_id,
        &AvailabilitySearchRequest {
            party_size: 2,
            service_date,
            time_window: None,
        },
    )
    .await?;
    let Some(slot) = response.slots.iter().find(|s| s.available) else {
        tracing::warn!("No available slots");
        return Ok(());
    };
    tracing::info!(slot_time = %slot.slot_time, "Slot chosen");

    // Hold + confirm under one idempotency key per booking attempt
    let intent_key = uuid::Uuid::new_v4().to_string();
    let held = hold::create_hold(
        &functions,
        &HoldRequest {
            tenant_id: tenant.tenant_id.clone(),
            slot_time: slot.slot_time.clone(),
            party_size: 2,
            table_id: slot.table_id.clone(),
        },
        &intent_key,
    )
    .await?;
    tracing::info!(hold_id = %held.hold_id, "Hold created");

    let confirmation = confirm::confirm_reservation(
        &functions,
        &tenant.tenant_id,
        &ConfirmRequest {
            hold_id: held.hold_id,
            guest: GuestDetails {
                name: "Demo Guest".to_string(),
                email: "demo@example.com".to_string(),
                phone: None,
                notes: None,
            },
            table_id: None,
            deposit_intent_id: None,
            source: Some("demo".to_string()),
        },
        &intent_key,
    )
    .await?;

    tracing::info!(
        reservation_id = %confirmation.reservation_id,
        confirmation_number = %confirmation.confirmation_number,
        status = %confirmation.status,
        "Reservation confirmed"
    );

    // Best effort - a dropped event never fails the flow
    tern_booking::analytics::track_conversion(
        &functions,
        &tern_booking::analytics::ConversionEvent {
            tenant_id: tenant.tenant_id.clone(),
            event: "booking_completed".to_string(),
            reservation_id: Some(confirmation.reservation_id.clone()),
            correlation_id: None,
        },
    )
    .await;

    Ok(())
}
