//! Response envelope construction.
//!
//! Every response carries a `meta` object with the request id, timing and an
//! RFC 3339 timestamp. Failure envelopes are uniform across flows:
//! `success: false`, the error message, any error context fields, and meta.

use std::time::Instant;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::error::GatewayError;

/// Per-request identity and timing carried into every envelope.
#[derive(Debug)]
pub(super) struct RequestContext {
    pub request_id: String,
    started: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        let mut request_id = Uuid::new_v4().simple().to_string();
        request_id.truncate(8);
        Self {
            request_id,
            started: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the request entered the handler.
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Elapsed time rendered the way meta durations are reported.
    pub fn elapsed_label(&self) -> String {
        format!("{}ms", self.elapsed_ms())
    }
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub(super) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders a flow-level failure envelope and logs the failure.
pub(super) fn failure(ctx: &RequestContext, err: &GatewayError) -> Response {
    tracing::warn!(
        request_id = %ctx.request_id,
        category = err.category(),
        error = %err,
        "request failed"
    );

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(false));
    body.insert("error".to_string(), Value::String(err.to_string()));
    if let Some(Value::Object(context)) = err.context() {
        body.extend(context);
    }
    body.insert(
        "meta".to_string(),
        json!({
            "requestId": ctx.request_id,
            "duration": ctx.elapsed_label(),
            "timestamp": timestamp(),
        }),
    );

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(Value::Object(body))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_eight_hex_chars() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.request_id.len(), 8);
        assert!(ctx.request_id.chars().all(|c| c.is_ascii_hexdigit()));

        let other = RequestContext::new();
        assert_ne!(ctx.request_id, other.request_id);
    }

    #[test]
    fn test_elapsed_label_format() {
        let ctx = RequestContext::new();
        let label = ctx.elapsed_label();
        assert!(label.ends_with("ms"));
        assert!(label.trim_end_matches("ms").parse::<u64>().is_ok());
    }

    #[test]
    fn test_timestamp_is_rfc3339_with_millis() {
        let stamp = timestamp();
        assert!(stamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
        // Millisecond precision keeps the fractional part three digits wide.
        let fraction = stamp.split('.').nth(1).unwrap();
        assert_eq!(fraction.trim_end_matches('Z').len(), 3);
    }

    #[test]
    fn test_failure_envelope_status() {
        let ctx = RequestContext::new();
        let response = failure(&ctx, &GatewayError::InvalidCredential);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = failure(&ctx, &GatewayError::MissingInput);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
