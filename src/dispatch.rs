//! Dispatch Engine
//!
//! Sends one compiled prompt to one provider and normalizes the result.
//! Exactly one attempt per call, with no retries and no provider fallback.
//! Latency is measured from send until the response body has been fully read.

use std::time::Instant;

use secrecy::SecretString;
use serde_json::Value;

use crate::defaults;
use crate::error::GatewayError;
use crate::providers::ProviderId;
use crate::types::DispatchResult;

/// Per-provider API origins.
///
/// Production uses the defaults; tests point these at a local mock server.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub anthropic: String,
    pub openai: String,
    pub google: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            anthropic: defaults::anthropic::ORIGIN.to_string(),
            openai: defaults::openai::ORIGIN.to_string(),
            google: defaults::google::ORIGIN.to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Same origin for every provider. Handy for tests.
    pub fn same(origin: &str) -> Self {
        Self {
            anthropic: origin.to_string(),
            openai: origin.to_string(),
            google: origin.to_string(),
        }
    }

    fn origin(&self, provider: ProviderId) -> &str {
        match provider {
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::OpenAi => &self.openai,
            ProviderId::Google => &self.google,
        }
    }
}

/// Performs provider dispatches over a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl Dispatcher {
    pub fn new(client: reqwest::Client, endpoints: ProviderEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Sends one transformation request to `provider`.
    ///
    /// `model` and `max_tokens` fall back to the provider default and the
    /// gateway default respectively. A non-success upstream status becomes
    /// [`GatewayError::Upstream`] carrying the message from the provider's
    /// error body.
    pub async fn dispatch(
        &self,
        provider: ProviderId,
        credential: &SecretString,
        model: Option<&str>,
        system_prompt: &str,
        input: &str,
        max_tokens: Option<u32>,
    ) -> Result<DispatchResult, GatewayError> {
        let model = model.unwrap_or(provider.descriptor().default_model);
        let max_tokens = max_tokens.unwrap_or(defaults::MAX_OUTPUT_TOKENS);
        let request = provider.build_request(
            self.endpoints.origin(provider),
            credential,
            model,
            system_prompt,
            input,
            max_tokens,
        )?;

        let started = Instant::now();
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = match serde_json::from_slice::<Value>(&bytes) {
                Ok(body) => provider.parse_error(&body),
                Err(_) => provider.parse_error(&Value::Null),
            };
            tracing::warn!(provider = %provider, status = %status, duration_ms, "upstream call failed");
            return Err(GatewayError::Upstream {
                provider,
                message,
            });
        }

        let body: Value = serde_json::from_slice(&bytes)?;
        let parsed = provider.parse_response(&body);
        tracing::debug!(provider = %provider, model, duration_ms, "upstream call succeeded");

        Ok(DispatchResult {
            text: parsed.text,
            usage: parsed.usage,
            model: parsed.model.unwrap_or_else(|| model.to_string()),
            provider,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = ProviderEndpoints::default();
        assert_eq!(endpoints.origin(ProviderId::Anthropic), "https://api.anthropic.com");
        assert_eq!(endpoints.origin(ProviderId::OpenAi), "https://api.openai.com");
        assert_eq!(
            endpoints.origin(ProviderId::Google),
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn test_same_origin_helper() {
        let endpoints = ProviderEndpoints::same("http://127.0.0.1:9999");
        assert_eq!(endpoints.origin(ProviderId::Anthropic), "http://127.0.0.1:9999");
        assert_eq!(endpoints.origin(ProviderId::Google), "http://127.0.0.1:9999");
    }
}
