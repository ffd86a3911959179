// tern-booking/tests/booking_flow.rs
// Integration tests against a mock remote-function backend

use httpmock::prelude::*;
use serde_json::json;
use shared::models::{
    AvailabilitySearchRequest, ConfirmRequest, GuestDetails, HoldRequest, ReservationStatus,
};
use shared::ErrorCode;
use tern_booking::{availability, confirm, hold, tenant::TenantResolver};
use tern_booking::{ClientConfig, FunctionsClient};

fn client(server: &MockServer) -> FunctionsClient {
    let base_url = format!("http://localhost:{}", server.port());
    FunctionsClient::new(&ClientConfig::new(base_url, "anon-key"))
}

fn guest() -> GuestDetails {
    GuestDetails {
        name: "Ana Duarte".to_string(),
        email: "ana@example.com".to_string(),
        phone: None,
        notes: None,
    }
}

#[tokio::test]
async fn unauthenticated_call_uses_anon_key_and_correlation_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/functions/v1/tenant")
            .header("authorization", "Bearer anon-key")
            .header("apikey", "anon-key")
            .header_exists("x-correlation-id");
        then.status(200).json_body(json!({
            "data": { "id": "t-1", "slug": "mariscos", "name": "Mariscos" }
        }));
    });

    let resolver = TenantResolver::new(client(&server));
    let tenant = resolver.resolve("mariscos", Some("widget-token")).await.unwrap();

    assert_eq!(tenant.tenant_id, "t-1");
    assert_eq!(tenant.timezone, "UTC");
    mock.assert_calls(1);
}

#[tokio::test]
async fn http_error_carries_status_and_correlation_id() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/tenant");
        then.status(503).body("upstream unavailable");
    });

    let resolver = TenantResolver::new(client(&server));
    let err = resolver.resolve("mariscos", Some("tok")).await.unwrap_err();

    // Transport failure re-wrapped by the resolution layer
    assert_eq!(err.code, ErrorCode::TenantLookupFailed);
    let details = err.details.unwrap();
    assert_eq!(details.get("cause_code").unwrap(), "HTTP_ERROR");
    assert_eq!(details.get("status").unwrap(), 503);
    assert!(details.contains_key("correlation_id"));
}

#[tokio::test]
async fn unparseable_body_maps_to_parse_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/widget-booking-live");
        then.status(200).body("<html>gateway error</html>");
    });

    let functions = client(&server);
    let err = availability::search_availability(
        &functions,
        "t-1",
        &AvailabilitySearchRequest {
            party_size: 2,
            service_date: "2025-06-01".to_string(),
            time_window: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::AvailabilitySearchFailed);
    let details = err.details.unwrap();
    assert_eq!(details.get("cause_code").unwrap(), "PARSE_ERROR");
    assert!(details.contains_key("raw"));
}

#[tokio::test]
async fn null_body_maps_to_no_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/widget-booking-live");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let functions = client(&server);
    let err = hold::create_hold(
        &functions,
        &HoldRequest {
            tenant_id: "t-1".to_string(),
            slot_time: "2025-06-01T19:00:00Z".to_string(),
            party_size: 2,
            table_id: None,
        },
        "intent-1",
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::HoldCreationFailed);
    assert_eq!(
        err.details.unwrap().get("cause_code").unwrap(),
        "NO_DATA"
    );
}

#[tokio::test]
async fn embedded_failure_surfaces_upstream_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/widget-booking-live");
        then.status(200).json_body(json!({
            "success": false,
            "error": { "code": "SLOT_TAKEN", "message": "Slot no longer available" }
        }));
    });

    let functions = client(&server);
    let err = hold::create_hold(
        &functions,
        &HoldRequest {
            tenant_id: "t-1".to_string(),
            slot_time: "2025-06-01T19:00:00Z".to_string(),
            party_size: 2,
            table_id: None,
        },
        "intent-1",
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::HoldCreationFailed);
    let details = err.details.unwrap();
    assert_eq!(details.get("cause_code").unwrap(), "API_ERROR");
    assert_eq!(details.get("upstream_code").unwrap(), "SLOT_TAKEN");
}

#[tokio::test]
async fn search_returns_typed_slots() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/widget-booking-live");
        then.status(200).json_body(json!({
            "data": {
                "slots": [
                    { "slot_time": "2025-06-01T19:00:00Z", "table_id": "tbl-4" },
                    { "slot_time": "2025-06-01T19:30:00Z", "available": false }
                ]
            }
        }));
    });

    let functions = client(&server);
    let response = availability::search_availability(
        &functions,
        "t-1",
        &AvailabilitySearchRequest {
            party_size: 4,
            service_date: "2025-06-01".to_string(),
            time_window: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(response.slots.len(), 2);
    assert!(response.slots[0].available);
    assert!(!response.slots[1].available);
}

#[tokio::test]
async fn hold_roundtrip_sends_idempotency_key() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/functions/v1/widget-booking-live")
            .header("x-idempotency-key", "intent-42");
        then.status(200).json_body(json!({
            "data": {
                "hold_id": "h-9",
                "expires_at": "2025-06-01T19:10:00Z",
                "slot_time": "2025-06-01T19:00:00Z",
                "party_size": 4
            }
        }));
    });

    let functions = client(&server);
    let request = HoldRequest {
        tenant_id: "t-1".to_string(),
        slot_time: "2025-06-01T19:00:00Z".to_string(),
        party_size: 4,
        table_id: None,
    };

    let held = hold::create_hold(&functions, &request, "intent-42").await.unwrap();
    assert_eq!(held.hold_id, "h-9");

    // Retrying the same intent presents the same key; the client request is
    // indistinguishable from the first and the server may deduplicate
    let again = hold::create_hold(&functions, &request, "intent-42").await.unwrap();
    assert_eq!(again, held);
    mock.assert_calls(2);
}

#[tokio::test]
async fn confirm_happy_path_normalizes_aliases() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/functions/v1/widget-booking-live")
            .header("x-idempotency-key", "intent-7");
        then.status(200).json_body(json!({
            "data": {
                "status": "Confirmed",
                "reservationId": "abc123",
                "date": "2025-06-01T19:00:00Z",
                "party_size": "4"
            }
        }));
    });

    let functions = client(&server);
    let confirmation = confirm::confirm_reservation(
        &functions,
        "t-1",
        &ConfirmRequest {
            hold_id: "h-9".to_string(),
            guest: guest(),
            table_id: None,
            deposit_intent_id: None,
            source: Some("widget".to_string()),
        },
        "intent-7",
    )
    .await
    .unwrap();

    assert_eq!(confirmation.reservation_id, "abc123");
    assert_eq!(confirmation.confirmation_number, "CONFABC123");
    assert_eq!(confirmation.status, ReservationStatus::Confirmed);
    assert_eq!(confirmation.summary.date, "2025-06-01T19:00:00.000Z");
    assert_eq!(confirmation.summary.party_size, 4);
    mock.assert_calls(1);
}

#[tokio::test]
async fn confirm_empty_success_is_a_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/widget-booking-live");
        then.status(200).json_body(json!({}));
    });

    let functions = client(&server);
    let err = confirm::confirm_reservation(
        &functions,
        "t-1",
        &ConfirmRequest {
            hold_id: "h-9".to_string(),
            guest: guest(),
            table_id: None,
            deposit_intent_id: None,
            source: None,
        },
        "intent-8",
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::EmptyResponse);
}

#[tokio::test]
async fn confirm_retries_server_errors_with_same_key() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/functions/v1/widget-booking-live")
            .header("x-idempotency-key", "intent-retry");
        then.status(502).body("bad gateway");
    });

    let functions = client(&server);
    let err = confirm::confirm_reservation(
        &functions,
        "t-1",
        &ConfirmRequest {
            hold_id: "h-9".to_string(),
            guest: guest(),
            table_id: None,
            deposit_intent_id: None,
            source: None,
        },
        "intent-retry",
    )
    .await
    .unwrap_err();

    // One initial attempt + one bounded retry, both with the same key
    mock.assert_calls(2);
    assert_eq!(err.code, ErrorCode::ReservationConfirmationFailed);
    assert_eq!(
        err.details.unwrap().get("cause_code").unwrap(),
        "HTTP_ERROR"
    );
}

#[tokio::test]
async fn confirm_does_not_retry_deterministic_failures() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/functions/v1/widget-booking-live");
        then.status(409).body("hold expired");
    });

    let functions = client(&server);
    let err = confirm::confirm_reservation(
        &functions,
        "t-1",
        &ConfirmRequest {
            hold_id: "h-expired".to_string(),
            guest: guest(),
            table_id: None,
            deposit_intent_id: None,
            source: None,
        },
        "intent-9",
    )
    .await
    .unwrap_err();

    mock.assert_calls(1);
    assert_eq!(err.code, ErrorCode::ReservationConfirmationFailed);
}

#[tokio::test]
async fn deposit_intent_returns_client_secret() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/functions/v1/create-deposit-intent");
        then.status(200)
            .json_body(json!({ "data": { "client_secret": "pi_secret_123" } }));
    });

    let functions = client(&server);
    let intent = tern_booking::deposit::create_deposit_intent(
        &functions,
        "t-1",
        25.0,
        Some("ana@example.com"),
        None,
    )
    .await
    .unwrap();

    assert_eq!(intent.client_secret, "pi_secret_123");
}
