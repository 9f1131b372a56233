//! Google Gemini generateContent API adapter.
//!
//! Gemini authenticates through a `key` query parameter rather than a
//! header, and its responses carry no token usage, so usage is reported as
//! zero.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CostTier, ModelInfo, ParsedResponse, ProviderDescriptor, ProviderId, WireRequest};
use crate::defaults;
use crate::error::GatewayError;
use crate::types::Usage;

const ERROR_FALLBACK: &str = "Gemini API error";

pub static DESCRIPTOR: ProviderDescriptor = ProviderDescriptor {
    id: ProviderId::Google,
    name: "Google (Gemini)",
    key_prefix: "AIza",
    default_model: defaults::google::DEFAULT_MODEL,
    models: &[
        ModelInfo {
            id: "gemini-2.0-flash",
            name: "Gemini 2.0 Flash",
            max_tokens: 8192,
            cost: CostTier::Lowest,
        },
        ModelInfo {
            id: "gemini-1.5-pro",
            name: "Gemini 1.5 Pro",
            max_tokens: 8192,
            cost: CostTier::Medium,
        },
        ModelInfo {
            id: "gemini-1.5-flash",
            name: "Gemini 1.5 Flash",
            max_tokens: 8192,
            cost: CostTier::Low,
        },
    ],
};

pub(super) fn build_request(
    origin: &str,
    credential: &SecretString,
    model: &str,
    system_prompt: &str,
    input: &str,
    max_tokens: u32,
) -> Result<WireRequest, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(WireRequest {
        url: format!(
            "{origin}/v1beta/models/{model}:generateContent?key={key}",
            key = credential.expose_secret(),
        ),
        headers,
        body: json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "parts": [{ "text": input }] }],
            "generationConfig": { "maxOutputTokens": max_tokens },
        }),
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

pub(super) fn parse_response(body: &Value) -> ParsedResponse {
    let parsed: GenerateContentResponse = serde_json::from_value(body.clone()).unwrap_or_default();
    let text = parsed
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.clone())
        .unwrap_or_default();
    ParsedResponse {
        text,
        usage: Usage::new(0, 0),
        model: Some("gemini".to_string()),
    }
}

pub(super) fn parse_error(body: &Value) -> String {
    super::error_message(body).unwrap_or_else(|| ERROR_FALLBACK.to_string())
}
