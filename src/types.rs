//! Shared Types
//!
//! Wire-facing value types used across the dispatch engine and the fan-out
//! flows.

use serde::{Deserialize, Serialize};

use crate::providers::ProviderId;

/// Token accounting for one or more dispatches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt side.
    pub input: u32,
    /// Tokens produced by the completion side.
    pub output: u32,
}

impl Usage {
    /// Create a new usage record.
    pub const fn new(input: u32, output: u32) -> Self {
        Self { input, output }
    }

    /// Fold another usage record into this one, saturating at `u32::MAX`.
    pub fn accumulate(&mut self, other: &Usage) {
        self.input = self.input.saturating_add(other.input);
        self.output = self.output.saturating_add(other.output);
    }
}

/// Normalized outcome of one successful provider dispatch.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// Transformed text extracted from the provider response.
    pub text: String,
    /// Token usage as the provider reported it.
    pub usage: Usage,
    /// Model the provider reported, else the one that was requested.
    pub model: String,
    /// Provider that served the request.
    pub provider: ProviderId,
    /// Wall-clock time from send to fully-read body, in milliseconds.
    pub duration_ms: u64,
}

/// Batch execution strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parallelism {
    /// Settle each unit before starting the next.
    #[default]
    Sequential,
    /// Start every unit, bounded by the batch-cap semaphore.
    Parallel,
}

/// One unit of batch work, as supplied by the caller.
///
/// Accepts either a bare string or an object with `input` and an optional
/// display `title`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchItem {
    /// Shorthand form: the string is the input.
    Text(String),
    /// Object form with optional fields.
    Titled {
        /// Text to transform.
        #[serde(default)]
        input: Option<String>,
        /// Display name echoed back in the per-item result.
        #[serde(default)]
        title: Option<String>,
    },
}

impl BatchItem {
    /// The text to transform, when present.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Titled { input, .. } => input.as_deref(),
        }
    }

    /// The display title, falling back to a positional one.
    pub fn title(&self, index: usize) -> String {
        match self {
            Self::Titled { title: Some(title), .. } => title.clone(),
            _ => format!("Item {}", index + 1),
        }
    }
}

/// Per-item outcome reported in the batch results array.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    /// Position of the item in the request array.
    pub index: usize,
    /// Display title for the item.
    pub title: String,
    /// Whether the unit produced output.
    pub success: bool,
    /// Input echo. Omitted when the item carried no usable input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Upstream latency in milliseconds, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-mode outcome reported by the multi-mode flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeResult {
    /// Catalog key of the mode.
    pub mode: &'static str,
    pub mode_emoji: &'static str,
    pub mode_name: &'static str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Success/failure tally for a fan-out flow.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl Summary {
    /// Tally from a slice of unit outcomes.
    pub fn tally<T>(results: &[T], succeeded: impl Fn(&T) -> bool) -> Self {
        let successful = results.iter().filter(|r| succeeded(*r)).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
        }
    }
}
