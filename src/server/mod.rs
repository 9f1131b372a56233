//! HTTP Surface
//!
//! Routing, shared state and response envelopes. Transform routes accept
//! POST and read routes accept GET; every route also answers OPTIONS with an
//! empty 204 preflight, and anything else gets a JSON 405.

mod cors;
mod envelope;
mod handlers;

use axum::Router;
use axum::middleware::map_response;
use axum::routing::{get, post};

use crate::dispatch::{Dispatcher, ProviderEndpoints};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// State with the production provider endpoints.
    pub fn new() -> Self {
        Self::with_endpoints(ProviderEndpoints::default())
    }

    /// State with custom provider origins. Tests point these at a local
    /// mock server.
    pub fn with_endpoints(endpoints: ProviderEndpoints) -> Self {
        Self {
            dispatcher: Dispatcher::new(reqwest::Client::new(), endpoints),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    let transform_routes = Router::new()
        .route(
            "/api/synthesize",
            post(handlers::synthesize)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/batch",
            post(handlers::batch)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/transform",
            post(handlers::transform)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .layer(map_response(cors::transform_headers));

    let read_routes = Router::new()
        .route(
            "/api/modes",
            get(handlers::modes)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/health",
            get(handlers::health)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .layer(map_response(cors::read_headers));

    transform_routes.merge(read_routes).with_state(state)
}
