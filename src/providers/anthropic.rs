//! Anthropic Messages API adapter.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CostTier, ModelInfo, ParsedResponse, ProviderDescriptor, ProviderId, WireRequest};
use crate::defaults;
use crate::error::GatewayError;
use crate::types::Usage;

const ERROR_FALLBACK: &str = "Claude API error";

pub static DESCRIPTOR: ProviderDescriptor = ProviderDescriptor {
    id: ProviderId::Anthropic,
    name: "Anthropic (Claude)",
    key_prefix: "sk-ant-",
    default_model: defaults::anthropic::DEFAULT_MODEL,
    models: &[
        ModelInfo {
            id: "claude-sonnet-4-20250514",
            name: "Claude Sonnet 4",
            max_tokens: 8192,
            cost: CostTier::Low,
        },
        ModelInfo {
            id: "claude-opus-4-20250514",
            name: "Claude Opus 4",
            max_tokens: 8192,
            cost: CostTier::High,
        },
        ModelInfo {
            id: "claude-haiku-4-20250514",
            name: "Claude Haiku 4",
            max_tokens: 8192,
            cost: CostTier::Lowest,
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
    let mut key = HeaderValue::from_str(credential.expose_secret())
        .map_err(|e| GatewayError::Internal(format!("Invalid API key format: {e}")))?;
    key.set_sensitive(true);
    headers.insert("x-api-key", key);
    headers.insert(
        "anthropic-version",
        HeaderValue::from_static(defaults::anthropic::API_VERSION),
    );
    Ok(WireRequest {
        url: format!("{origin}/v1/messages"),
        headers,
        body: json!({
            "model": model,
            "max_tokens": max_tokens,
            "system": system_prompt,
            "messages": [{ "role": "user", "content": input }],
        }),
    })
}

#[derive(Debug, Default, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: TokenCounts,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct TokenCounts {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

pub(super) fn parse_response(body: &Value) -> ParsedResponse {
    let parsed: MessagesResponse = serde_json::from_value(body.clone()).unwrap_or_default();
    ParsedResponse {
        text: parsed.content.first().map(|block| block.text.clone()).unwrap_or_default(),
        usage: Usage::new(parsed.usage.input_tokens, parsed.usage.output_tokens),
        model: parsed.model,
    }
}

pub(super) fn parse_error(body: &Value) -> String {
    super::error_message(body).unwrap_or_else(|| ERROR_FALLBACK.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_build_request_wire_shape() {
        let request = build_request(
            "https://api.anthropic.com",
            &secret("sk-ant-test"),
            "claude-sonnet-4-20250514",
            "Be brief.",
            "hello",
            4096,
        )
        .unwrap();

        assert_eq!(request.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(request.headers.get("x-api-key").unwrap(), "sk-ant-test");
        assert_eq!(request.headers.get("anthropic-version").unwrap(), "2023-06-01");
        assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(
            request.body,
            json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 4096,
                "system": "Be brief.",
                "messages": [{ "role": "user", "content": "hello" }],
            })
        );
    }

    #[test]
    fn test_build_request_rejects_non_ascii_key() {
        let err = build_request(
            "https://api.anthropic.com",
            &secret("sk-ant-\nbroken"),
            "claude-sonnet-4-20250514",
            "s",
            "i",
            10,
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::Internal(_)));
    }

    #[test]
    fn test_parse_response() {
        let body = json!({
            "id": "msg_01",
            "model": "claude-sonnet-4-20250514",
            "content": [{ "type": "text", "text": "styled output" }],
            "usage": { "input_tokens": 12, "output_tokens": 34 },
        });
        let parsed = parse_response(&body);
        assert_eq!(parsed.text, "styled output");
        assert_eq!(parsed.usage, Usage::new(12, 34));
        assert_eq!(parsed.model.as_deref(), Some("claude-sonnet-4-20250514"));
    }

    #[test]
    fn test_parse_response_tolerates_missing_fields() {
        let parsed = parse_response(&json!({}));
        assert_eq!(parsed.text, "");
        assert_eq!(parsed.usage, Usage::new(0, 0));
        assert_eq!(parsed.model, None);
    }

    #[test]
    fn test_parse_error_fallback() {
        assert_eq!(
            parse_error(&json!({"error": {"message": "overloaded"}})),
            "overloaded"
        );
        assert_eq!(parse_error(&json!({"unexpected": true})), "Claude API error");
        assert_eq!(parse_error(&Value::Null), "Claude API error");
    }
}
