//! Error Types
//!
//! All fallible paths in the gateway funnel into [`GatewayError`]. Each
//! variant knows the HTTP status it maps to at the flow boundary and the
//! outward-facing category reported in logs, so handlers never match on
//! variants themselves.

use serde_json::{Value, json};
use thiserror::Error;

use crate::defaults;
use crate::providers::ProviderId;

/// Unified error type for the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request body carried no usable input text.
    #[error("Missing or empty input text")]
    MissingInput,

    /// The batch request carried no usable items array.
    #[error("Missing or empty items array")]
    MissingItems,

    /// The batch request exceeded the item cap.
    #[error("Batch too large. Max {max} items per request.", max = defaults::MAX_BATCH_ITEMS)]
    BatchTooLarge {
        /// Number of items the caller sent.
        received: usize,
    },

    /// The multi-mode request named more valid modes than the cap allows.
    #[error("Too many modes. Max {max} per request.", max = defaults::MAX_TRANSFORM_MODES)]
    TooManyModes {
        /// Number of valid modes after unknown names were filtered out.
        received: usize,
    },

    /// Every requested mode name was unknown.
    #[error("No valid voice modes specified")]
    NoValidModes,

    /// No provider could be resolved from the request credential.
    #[error("Invalid or missing API key")]
    InvalidCredential,

    /// A route was hit with a method it does not serve.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The provider answered with a non-success status. The message is the
    /// one extracted from the provider's own error body.
    #[error("{message}")]
    Upstream {
        /// Provider that produced the failure.
        provider: ProviderId,
        /// Human-readable message from the provider error body.
        message: String,
    },

    /// Transport-level failure before any provider response was available.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A body could not be parsed as JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// Anything else. Kept rare on purpose.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code this error maps to at the flow boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingInput
            | Self::MissingItems
            | Self::BatchTooLarge { .. }
            | Self::TooManyModes { .. }
            | Self::NoValidModes => 400,
            Self::InvalidCredential => 401,
            Self::MethodNotAllowed => 405,
            Self::Upstream { .. } => 502,
            Self::Http(_) | Self::Json(_) | Self::Internal(_) => 500,
        }
    }

    /// Coarse failure category used in log events.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingInput
            | Self::MissingItems
            | Self::BatchTooLarge { .. }
            | Self::TooManyModes { .. }
            | Self::NoValidModes
            | Self::MethodNotAllowed => "validation",
            Self::InvalidCredential => "auth",
            Self::Upstream { .. } => "upstream",
            Self::Http(_) | Self::Json(_) | Self::Internal(_) => "unexpected",
        }
    }

    /// Extra fields merged into the failure envelope next to `error`.
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::BatchTooLarge { received } => Some(json!({
                "received": received,
                "hint": "Split into multiple requests for larger batches.",
            })),
            Self::TooManyModes { received } => Some(json!({
                "received": received,
            })),
            Self::NoValidModes => Some(json!({
                "available": crate::catalog::mode_names(),
            })),
            Self::InvalidCredential => {
                let supported: Vec<String> = ProviderId::ALL
                    .iter()
                    .map(|p| {
                        let d = p.descriptor();
                        format!("{} ({}...)", d.name, d.key_prefix)
                    })
                    .collect();
                Some(json!({
                    "hint": "Provide your API key via x-api-key header",
                    "supported": supported,
                }))
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Http(format!("Request timeout: {err}"))
        } else if err.is_connect() {
            Self::Http(format!("Connection failed: {err}"))
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::MissingInput.status_code(), 400);
        assert_eq!(GatewayError::BatchTooLarge { received: 11 }.status_code(), 400);
        assert_eq!(GatewayError::InvalidCredential.status_code(), 401);
        assert_eq!(GatewayError::MethodNotAllowed.status_code(), 405);
        let upstream = GatewayError::Upstream {
            provider: ProviderId::Anthropic,
            message: "rate limited".to_string(),
        };
        assert_eq!(upstream.status_code(), 502);
        assert_eq!(GatewayError::Http("boom".to_string()).status_code(), 500);
        assert_eq!(GatewayError::Json("boom".to_string()).status_code(), 500);
    }

    #[test]
    fn test_categories() {
        assert_eq!(GatewayError::MissingItems.category(), "validation");
        assert_eq!(GatewayError::InvalidCredential.category(), "auth");
        let upstream = GatewayError::Upstream {
            provider: ProviderId::OpenAi,
            message: "quota".to_string(),
        };
        assert_eq!(upstream.category(), "upstream");
        assert_eq!(GatewayError::Internal("x".to_string()).category(), "unexpected");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GatewayError::MissingInput.to_string(),
            "Missing or empty input text"
        );
        assert_eq!(
            GatewayError::BatchTooLarge { received: 12 }.to_string(),
            "Batch too large. Max 10 items per request."
        );
        assert_eq!(
            GatewayError::TooManyModes { received: 6 }.to_string(),
            "Too many modes. Max 5 per request."
        );
        let upstream = GatewayError::Upstream {
            provider: ProviderId::Google,
            message: "API key not valid".to_string(),
        };
        assert_eq!(upstream.to_string(), "API key not valid");
    }

    #[test]
    fn test_invalid_credential_context() {
        let context = GatewayError::InvalidCredential.context().unwrap();
        assert_eq!(
            context["hint"],
            "Provide your API key via x-api-key header"
        );
        let supported = context["supported"].as_array().unwrap();
        assert_eq!(supported.len(), 3);
        assert_eq!(supported[0], "Anthropic (Claude) (sk-ant-...)");
    }

    #[test]
    fn test_no_valid_modes_context() {
        let context = GatewayError::NoValidModes.context().unwrap();
        assert_eq!(context["available"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        let err: GatewayError = parse_err.into();
        assert!(matches!(err, GatewayError::Json(_)));
        assert_eq!(err.status_code(), 500);
    }
}
