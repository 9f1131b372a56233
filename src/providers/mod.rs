//! Provider Registry
//!
//! The gateway fronts a closed set of upstream providers. Each provider
//! module owns its wire format: endpoint path, auth headers, request body
//! shape, and how to pull text, usage and error messages back out of a
//! response. Everything else in the crate goes through [`ProviderId`] and
//! never touches provider-specific JSON.

pub mod anthropic;
pub mod google;
pub mod openai;

use reqwest::header::HeaderMap;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::GatewayError;
use crate::types::Usage;

/// Closed set of supported upstream providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Anthropic,
    OpenAi,
    Google,
}

impl ProviderId {
    /// All providers, in catalog order.
    pub const ALL: [ProviderId; 3] = [
        ProviderId::Anthropic,
        ProviderId::OpenAi,
        ProviderId::Google,
    ];

    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Google => "google",
        }
    }

    /// Case-insensitive lookup by identifier.
    pub fn from_name(name: &str) -> Option<ProviderId> {
        match name.to_lowercase().as_str() {
            "anthropic" => Some(Self::Anthropic),
            "openai" => Some(Self::OpenAi),
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    /// Static metadata for this provider.
    pub fn descriptor(&self) -> &'static ProviderDescriptor {
        match self {
            Self::Anthropic => &anthropic::DESCRIPTOR,
            Self::OpenAi => &openai::DESCRIPTOR,
            Self::Google => &google::DESCRIPTOR,
        }
    }

    /// Builds the provider-specific wire request.
    pub fn build_request(
        &self,
        origin: &str,
        credential: &SecretString,
        model: &str,
        system_prompt: &str,
        input: &str,
        max_tokens: u32,
    ) -> Result<WireRequest, GatewayError> {
        match self {
            Self::Anthropic => {
                anthropic::build_request(origin, credential, model, system_prompt, input, max_tokens)
            }
            Self::OpenAi => {
                openai::build_request(origin, credential, model, system_prompt, input, max_tokens)
            }
            Self::Google => {
                google::build_request(origin, credential, model, system_prompt, input, max_tokens)
            }
        }
    }

    /// Extracts the normalized payload from a success body. Lenient: missing
    /// fields become empty text or zero usage rather than errors.
    pub fn parse_response(&self, body: &Value) -> ParsedResponse {
        match self {
            Self::Anthropic => anthropic::parse_response(body),
            Self::OpenAi => openai::parse_response(body),
            Self::Google => google::parse_response(body),
        }
    }

    /// Extracts a human-readable message from an error body, falling back to
    /// a provider-specific generic message.
    pub fn parse_error(&self, body: &Value) -> String {
        match self {
            Self::Anthropic => anthropic::parse_error(body),
            Self::OpenAi => openai::parse_error(body),
            Self::Google => google::parse_error(body),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for one provider.
#[derive(Debug)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    /// Display name, e.g. `"Anthropic (Claude)"`.
    pub name: &'static str,
    /// Credential prefix that routes to this provider.
    pub key_prefix: &'static str,
    pub default_model: &'static str,
    /// Known models, for discovery.
    pub models: &'static [ModelInfo],
}

/// One known model with discovery metadata.
#[derive(Debug)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub max_tokens: u32,
    pub cost: CostTier,
}

/// Relative price band for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

/// One fully-formed outbound HTTP request.
#[derive(Debug)]
pub struct WireRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Normalized success payload before dispatch metadata is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub text: String,
    pub usage: Usage,
    /// Model name the provider reported, when it reports one.
    pub model: Option<String>,
}

/// Resolves the provider for a request credential.
///
/// A recognized hint wins outright. Otherwise the credential prefix decides:
/// `sk-ant-` is checked before the bare `sk-` prefix so Anthropic keys are
/// never misread as OpenAI keys. Returns `None` when no provider can be
/// resolved; that is an auth outcome, not an error.
pub fn detect(credential: Option<&str>, hint: Option<&str>) -> Option<ProviderId> {
    let credential = credential?;
    if credential.is_empty() {
        return None;
    }
    if let Some(id) = hint.and_then(ProviderId::from_name) {
        return Some(id);
    }
    if credential.starts_with(anthropic::DESCRIPTOR.key_prefix) {
        Some(ProviderId::Anthropic)
    } else if credential.starts_with(google::DESCRIPTOR.key_prefix) {
        Some(ProviderId::Google)
    } else if credential.starts_with(openai::DESCRIPTOR.key_prefix) {
        Some(ProviderId::OpenAi)
    } else {
        None
    }
}

/// Per-provider model listing for the discovery endpoint.
pub fn available_models() -> Value {
    let mut providers = Map::new();
    for id in ProviderId::ALL {
        let descriptor = id.descriptor();
        let mut models = Map::new();
        for model in descriptor.models {
            models.insert(
                model.id.to_string(),
                json!({
                    "name": model.name,
                    "maxTokens": model.max_tokens,
                    "cost": model.cost,
                }),
            );
        }
        providers.insert(
            id.as_str().to_string(),
            json!({
                "name": descriptor.name,
                "default": descriptor.default_model,
                "models": models,
            }),
        );
    }
    Value::Object(providers)
}

/// Pulls `error.message` out of a provider error body.
fn error_message(body: &Value) -> Option<String> {
    body.get("error")?.get("message")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_prefix() {
        assert_eq!(detect(Some("sk-ant-api03-xyz"), None), Some(ProviderId::Anthropic));
        assert_eq!(detect(Some("sk-proj-xyz"), None), Some(ProviderId::OpenAi));
        assert_eq!(detect(Some("AIzaSyExample"), None), Some(ProviderId::Google));
    }

    #[test]
    fn test_detect_checks_anthropic_before_openai() {
        // "sk-ant-" also matches the bare "sk-" prefix; longest must win.
        assert_eq!(detect(Some("sk-ant-xyz"), None), Some(ProviderId::Anthropic));
    }

    #[test]
    fn test_detect_unknown_prefix_is_none() {
        assert_eq!(detect(Some("banana"), None), None);
        assert_eq!(detect(Some(""), None), None);
        assert_eq!(detect(None, None), None);
    }

    #[test]
    fn test_hint_wins_over_prefix() {
        assert_eq!(
            detect(Some("sk-ant-xyz"), Some("openai")),
            Some(ProviderId::OpenAi)
        );
        assert_eq!(
            detect(Some("sk-xyz"), Some("GOOGLE")),
            Some(ProviderId::Google)
        );
    }

    #[test]
    fn test_unknown_hint_falls_back_to_prefix() {
        assert_eq!(detect(Some("sk-xyz"), Some("mistral")), Some(ProviderId::OpenAi));
    }

    #[test]
    fn test_hint_never_rescues_a_missing_credential() {
        assert_eq!(detect(None, Some("openai")), None);
        assert_eq!(detect(Some(""), Some("openai")), None);
    }

    #[test]
    fn test_from_name_round_trips() {
        for id in ProviderId::ALL {
            assert_eq!(ProviderId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(ProviderId::from_name("Anthropic"), Some(ProviderId::Anthropic));
        assert_eq!(ProviderId::from_name("claude"), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_value(ProviderId::OpenAi).unwrap(), "openai");
        assert_eq!(ProviderId::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_available_models_shape() {
        let models = available_models();
        assert_eq!(models["anthropic"]["default"], "claude-sonnet-4-20250514");
        assert_eq!(models["openai"]["models"]["gpt-4o"]["maxTokens"], 16384);
        assert_eq!(models["google"]["models"]["gemini-2.0-flash"]["cost"], "lowest");
    }

    #[test]
    fn test_error_message_extraction() {
        let body = json!({"error": {"type": "rate_limit", "message": "slow down"}});
        assert_eq!(error_message(&body), Some("slow down".to_string()));
        assert_eq!(error_message(&json!({"error": "plain"})), None);
        assert_eq!(error_message(&Value::Null), None);
    }
}
