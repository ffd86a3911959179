//! Remote function transport
//!
//! Authenticated POST calls to named remote functions. Every call carries a
//! freshly generated correlation id for tracing; failures map onto the
//! transport section of the error taxonomy. Retries are a caller policy -
//! this layer never retries.

use crate::auth::AccessTokenChain;
use crate::config::ClientConfig;
use reqwest::Client;
use serde_json::Value;
use shared::{BookingError, BookingResult, ErrorCode};
use std::sync::Arc;
use uuid::Uuid;

/// HTTP client for invoking remote functions
#[derive(Clone)]
pub struct FunctionsClient {
    client: Client,
    base_url: String,
    anon_key: String,
    tokens: Arc<AccessTokenChain>,
}

impl FunctionsClient {
    /// Create a new functions client from configuration
    ///
    /// Starts with an empty token chain (every call runs unauthenticated
    /// on the anon key); attach one with [`with_token_chain`].
    ///
    /// [`with_token_chain`]: FunctionsClient::with_token_chain
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
            tokens: Arc::new(AccessTokenChain::new(Vec::new())),
        }
    }

    /// Attach an access-token resolution chain
    pub fn with_token_chain(mut self, tokens: AccessTokenChain) -> Self {
        self.tokens = Arc::new(tokens);
        self
    }

    fn function_url(&self, function: &str) -> String {
        format!(
            "{}/functions/v1/{}",
            self.base_url.trim_end_matches('/'),
            function
        )
    }

    /// Invoke a remote function with a JSON body
    pub async fn invoke(&self, function: &str, body: &Value) -> BookingResult<Value> {
        self.invoke_with_idempotency(function, body, None).await
    }

    /// Invoke a remote function, optionally tagging the request with a
    /// caller-supplied idempotency key so the server can deduplicate
    /// retried identical intents
    pub async fn invoke_with_idempotency(
        &self,
        function: &str,
        body: &Value,
        idempotency_key: Option<&str>,
    ) -> BookingResult<Value> {
        let correlation_id = Uuid::new_v4().to_string();

        // Three-tier token resolution; anon key when nothing resolves
        let bearer = match self.tokens.resolve().await {
            Some(token) => token,
            None => self.anon_key.clone(),
        };

        let mut request = self
            .client
            .post(self.function_url(function))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
            .header("apikey", &self.anon_key)
            .header("x-correlation-id", &correlation_id)
            .json(body);

        if let Some(key) = idempotency_key {
            request = request.header("x-idempotency-key", key);
        }

        tracing::debug!(function, %correlation_id, "Invoking remote function");

        let response = request.send().await.map_err(|e| {
            BookingError::network(e.to_string())
                .with_correlation_id(&correlation_id)
                .with_detail("endpoint", function)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            BookingError::network(e.to_string())
                .with_correlation_id(&correlation_id)
                .with_detail("endpoint", function)
        })?;

        if !status.is_success() {
            return Err(BookingError::http(
                status.as_u16(),
                format!("{function} returned HTTP {status}"),
            )
            .with_correlation_id(&correlation_id)
            .with_detail("endpoint", function)
            .with_detail("request", body.clone())
            .with_detail("body", text));
        }

        // An absent body is the server-side equivalent of undefined
        if text.trim().is_empty() {
            return Err(BookingError::new(ErrorCode::NoData)
                .with_correlation_id(&correlation_id)
                .with_detail("endpoint", function));
        }

        let parsed: Value = serde_json::from_str(&text).map_err(|_| {
            BookingError::parse(text.clone())
                .with_correlation_id(&correlation_id)
                .with_detail("endpoint", function)
        })?;

        if parsed.is_null() {
            return Err(BookingError::new(ErrorCode::NoData)
                .with_correlation_id(&correlation_id)
                .with_detail("endpoint", function));
        }

        if parsed.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(embedded_error(&parsed)
                .with_correlation_id(&correlation_id)
                .with_detail("endpoint", function));
        }

        Ok(parsed)
    }
}

/// Build the error for a `{ success: false, error: {...} }` body.
///
/// Upstream codes that name a known taxonomy code map onto it; anything
/// else stays `API_ERROR` with the upstream code preserved in details.
fn embedded_error(payload: &Value) -> BookingError {
    let error = payload.get("error");
    let upstream_code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str);
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(ErrorCode::ApiError.message());

    let code = upstream_code
        .and_then(ErrorCode::parse)
        .unwrap_or(ErrorCode::ApiError);

    let mut err = BookingError::with_message(code, message);
    if let Some(upstream) = upstream_code {
        err = err.with_detail("upstream_code", upstream);
    }
    err
}
