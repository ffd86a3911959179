//! Deposit payment intents

use crate::transport::FunctionsClient;
use serde_json::{Value, json};
use shared::BookingResult;
use shared::models::DepositIntent;

/// Create a payment intent for a deposit-backed booking.
///
/// Transport failures surface with their own code - the caller decides how
/// a failed deposit affects the booking flow.
pub async fn create_deposit_intent(
    functions: &FunctionsClient,
    tenant_id: &str,
    amount: f64,
    email: Option<&str>,
    description: Option<&str>,
) -> BookingResult<DepositIntent> {
    let mut body = json!({ "tenant_id": tenant_id, "amount": amount });
    if let Some(email) = email {
        body["email"] = Value::String(email.to_string());
    }
    if let Some(description) = description {
        body["description"] = Value::String(description.to_string());
    }

    let payload = functions.invoke("create-deposit-intent", &body).await?;
    let inner = payload.get("data").cloned().unwrap_or(payload);

    serde_json::from_value(inner).map_err(|e| {
        shared::BookingError::with_message(
            shared::ErrorCode::ApiError,
            format!("Malformed deposit intent response: {e}"),
        )
    })
}
