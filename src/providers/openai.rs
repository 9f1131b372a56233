//! OpenAI Chat Completions API adapter.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CostTier, ModelInfo, ParsedResponse, ProviderDescriptor, ProviderId, WireRequest};
use crate::defaults;
use crate::error::GatewayError;
use crate::types::Usage;

const ERROR_FALLBACK: &str = "OpenAI API error";

pub static DESCRIPTOR: ProviderDescriptor = ProviderDescriptor {
    id: ProviderId::OpenAi,
    name: "OpenAI (GPT)",
    key_prefix: "sk-",
    default_model: defaults::openai::DEFAULT_MODEL,
    models: &[
        ModelInfo {
            id: "gpt-4o",
            name: "GPT-4o",
            max_tokens: 16384,
            cost: CostTier::Medium,
        },
        ModelInfo {
            id: "gpt-4o-mini",
            name: "GPT-4o Mini",
            max_tokens: 16384,
            cost: CostTier::Lowest,
        },
        ModelInfo {
            id: "gpt-4-turbo",
            name: "GPT-4 Turbo",
            max_tokens: 4096,
            cost: CostTier::High,
        },
        ModelInfo {
            id: "o1",
            name: "o1 (Reasoning)",
            max_tokens: 100000,
            cost: CostTier::Highest,
        },
        ModelInfo {
            id: "o1-mini",
            name: "o1 Mini",
            max_tokens: 65536,
            cost: CostTier::High,
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
    let bearer = format!("Bearer {}", credential.expose_secret());
    let mut auth = HeaderValue::from_str(&bearer)
        .map_err(|e| GatewayError::Internal(format!("Invalid API key format: {e}")))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    Ok(WireRequest {
        url: format!("{origin}/v1/chat/completions"),
        headers,
        body: json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": input },
            ],
        }),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: TokenCounts,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenCounts {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

pub(super) fn parse_response(body: &Value) -> ParsedResponse {
    let parsed: ChatResponse = serde_json::from_value(body.clone()).unwrap_or_default();
    ParsedResponse {
        text: parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default(),
        usage: Usage::new(parsed.usage.prompt_tokens, parsed.usage.completion_tokens),
        model: parsed.model,
    }
}

pub(super) fn parse_error(body: &Value) -> String {
    super::error_message(body).unwrap_or_else(|| ERROR_FALLBACK.to_string())
}
