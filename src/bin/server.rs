//! voicegate HTTP server binary.
//!
//! Starts the axum server exposing the transformation gateway endpoints.
//! Callers bring their own provider API key on every request; the server
//! itself holds no credentials.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `RUST_LOG` — Tracing filter (default: "info,voicegate=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use voicegate::config::ServerConfig;
use voicegate::server::{AppState, app};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,voicegate=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let bind_addr = format!("0.0.0.0:{}", config.port);

    let state = AppState::new();
    let router = app(state);

    tracing::info!("voicegate server starting on {}", bind_addr);
    tracing::info!("  POST /api/synthesize");
    tracing::info!("  POST /api/batch");
    tracing::info!("  POST /api/transform");
    tracing::info!("  GET  /api/modes");
    tracing::info!("  GET  /api/health");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, router)
        .await
        .expect("Server failed");
}
