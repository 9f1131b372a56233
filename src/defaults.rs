//! Default Configuration Values
//!
//! This module centralizes the default values used throughout the gateway.
//! Having defaults in one place makes them easier to maintain, document, and
//! adjust.

/// Default maximum output tokens forwarded to a provider when a request does
/// not name its own limit.
pub const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Hard cap on items accepted by one batch request.
pub const MAX_BATCH_ITEMS: usize = 10;

/// Hard cap on voice modes accepted by one multi-mode request.
pub const MAX_TRANSFORM_MODES: usize = 5;

/// Modes the multi-mode flow runs when the request names none.
pub const DEFAULT_TRANSFORM_MODES: [&str; 3] = ["Raw", "Teacher", "Prophet"];

/// HTTP server defaults
pub mod server {
    /// Port used when the `PORT` environment variable is unset.
    pub const PORT: u16 = 8080;
}

/// Anthropic-specific defaults
pub mod anthropic {
    /// Default API origin.
    pub const ORIGIN: &str = "https://api.anthropic.com";

    /// Messages API version header value.
    pub const API_VERSION: &str = "2023-06-01";

    /// Default model for Anthropic.
    pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
}

/// OpenAI-specific defaults
pub mod openai {
    /// Default API origin.
    pub const ORIGIN: &str = "https://api.openai.com";

    /// Default model for OpenAI.
    pub const DEFAULT_MODEL: &str = "gpt-4o";
}

/// Google Gemini-specific defaults
pub mod google {
    /// Default API origin.
    pub const ORIGIN: &str = "https://generativelanguage.googleapis.com";

    /// Default model for Google.
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out_caps() {
        assert!(DEFAULT_TRANSFORM_MODES.len() <= MAX_TRANSFORM_MODES);
        assert!(MAX_TRANSFORM_MODES <= MAX_BATCH_ITEMS);
    }

    #[test]
    fn test_provider_origins_are_https() {
        assert!(anthropic::ORIGIN.starts_with("https://"));
        assert!(openai::ORIGIN.starts_with("https://"));
        assert!(google::ORIGIN.starts_with("https://"));
    }
}
