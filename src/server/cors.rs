//! CORS header emission.
//!
//! Any origin is allowed. Transform routes advertise POST plus the custom
//! request headers; read routes advertise GET only. The headers ride on
//! every response from a route group, including failures and preflights.

use axum::http::HeaderMap;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderValue,
};
use axum::response::Response;

const TRANSFORM_METHODS: &str = "POST, OPTIONS";
const TRANSFORM_HEADERS: &str = "Content-Type, x-api-key, x-provider, x-model";
const READ_METHODS: &str = "GET, OPTIONS";
const READ_HEADERS: &str = "Content-Type";

/// Adds the CORS set for the transform (POST) routes.
pub(super) async fn transform_headers(mut response: Response) -> Response {
    apply(response.headers_mut(), TRANSFORM_METHODS, TRANSFORM_HEADERS);
    response
}

/// Adds the CORS set for the read-only routes.
pub(super) async fn read_headers(mut response: Response) -> Response {
    apply(response.headers_mut(), READ_METHODS, READ_HEADERS);
    response
}

fn apply(headers: &mut HeaderMap, methods: &'static str, allow_headers: &'static str) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(allow_headers));
}
