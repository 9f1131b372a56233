//! # Voicegate - Multi-Provider Voice Transformation Gateway
//!
//! Voicegate rewrites text through configurable "voice modes" by compiling a
//! deterministic system prompt and dispatching it to the caller's own LLM
//! provider. Callers bring their own API key; the gateway holds no upstream
//! credentials of its own and never persists the ones it is handed.
//!
//! ## Features
//!
//! - 🎛️ **Voice modes**: ten style templates, each with a six-slider baseline
//! - 🎚️ **Faders and toggles**: per-request overrides with long-name or alias keys
//! - 💾 **Presets**: saved slider/toggle bundles that merge under request values
//! - 🔑 **Key-based routing**: provider inferred from the credential prefix,
//!   overridable with an explicit hint header
//! - 🔌 **Three providers**: Anthropic Messages, OpenAI Chat Completions and
//!   Google Gemini, behind one normalized result shape
//! - 📦 **Fan-out flows**: batched inputs and multi-mode comparison with
//!   per-unit failure isolation
//!
//! ## Quick Start
//!
//! Compile a system prompt without any network traffic:
//!
//! ```rust
//! use voicegate::prompt::{self, FaderOverrides, ToggleOverrides};
//!
//! let system_prompt = prompt::build_system_prompt(
//!     "Teacher",
//!     &FaderOverrides {
//!         certainty: Some(9),
//!         ..Default::default()
//!     },
//!     &ToggleOverrides::default(),
//!     None,
//! );
//! assert!(system_prompt.contains("Certainty: 9/10"));
//! ```
//!
//! Serve the HTTP API:
//!
//! ```rust,no_run
//! use voicegate::server::{AppState, app};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app(AppState::new())).await.unwrap();
//! }
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod flows;
pub mod prompt;
pub mod providers;
pub mod server;
pub mod types;

// Re-export the types most callers touch.
pub use catalog::{FaderSettings, Preset, Toggles, VoiceMode};
pub use dispatch::{Dispatcher, ProviderEndpoints};
pub use error::GatewayError;
pub use providers::ProviderId;
pub use types::Usage;
