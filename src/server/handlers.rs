//! Request handlers for the five API routes.
//!
//! Transform handlers share one shape: authenticate from headers, parse the
//! body, validate, run the flow, envelope the outcome. Any error short-circuits
//! into a failure envelope with the matching status code.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::AppState;
use super::envelope::{self, RequestContext};
use crate::catalog::{self, FaderOverrides, ToggleOverrides};
use crate::defaults;
use crate::error::GatewayError;
use crate::flows;
use crate::prompt;
use crate::providers::{self, ProviderId};
use crate::types::{BatchItem, Parallelism};

const DEFAULT_VOICE_MODE: &str = "Raw";

/// Authenticated caller: the detected provider and the credential to forward.
#[derive(Debug)]
struct Caller {
    provider: ProviderId,
    credential: SecretString,
}

/// Resolves the caller from `x-api-key` and the optional `x-provider` hint.
///
/// The credential is forwarded upstream verbatim and never logged or stored.
fn authenticate(headers: &HeaderMap) -> Result<Caller, GatewayError> {
    let key = header_str(headers, "x-api-key").unwrap_or("");
    let hint = header_str(headers, "x-provider");
    let provider = providers::detect(Some(key), hint).ok_or(GatewayError::InvalidCredential)?;
    Ok(Caller {
        provider,
        credential: SecretString::from(key.to_string()),
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Model precedence: request body, then `x-model` header, then the provider
/// default. Empty strings count as absent.
fn resolve_model<'a>(
    body_model: Option<&'a str>,
    headers: &'a HeaderMap,
    provider: ProviderId,
) -> &'a str {
    body_model
        .filter(|model| !model.is_empty())
        .or_else(|| header_str(headers, "x-model").filter(|model| !model.is_empty()))
        .unwrap_or(provider.descriptor().default_model)
}

fn require_input(input: Option<&str>) -> Result<&str, GatewayError> {
    match input {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GatewayError::MissingInput),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SynthesizeRequest {
    input: Option<String>,
    voice_mode: Option<String>,
    faders: FaderOverrides,
    toggles: ToggleOverrides,
    model: Option<String>,
    max_tokens: Option<u32>,
    preset: Option<String>,
    custom_prompt: Option<String>,
    custom_instructions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BatchRequest {
    items: Option<Vec<BatchItem>>,
    voice_mode: Option<String>,
    faders: FaderOverrides,
    toggles: ToggleOverrides,
    model: Option<String>,
    preset: Option<String>,
    custom_prompt: Option<String>,
    custom_instructions: Option<String>,
    parallelism: Parallelism,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TransformRequest {
    input: Option<String>,
    modes: Option<Vec<String>>,
    faders: FaderOverrides,
    toggles: ToggleOverrides,
    model: Option<String>,
}

/// POST /api/synthesize
pub(super) async fn synthesize(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::new();
    match synthesize_flow(&state, &headers, &body, &ctx).await {
        Ok(response) => response,
        Err(err) => envelope::failure(&ctx, &err),
    }
}

async fn synthesize_flow(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
    ctx: &RequestContext,
) -> Result<Response, GatewayError> {
    let caller = authenticate(headers)?;
    let request: SynthesizeRequest = serde_json::from_slice(body)?;
    let input = require_input(request.input.as_deref())?;

    let preset = request.preset.as_deref().filter(|name| !name.is_empty());
    let style = prompt::resolve_style(
        request.voice_mode.as_deref().unwrap_or(DEFAULT_VOICE_MODE),
        preset,
        &request.faders,
        &request.toggles,
    );
    let system_prompt = match request.custom_prompt.as_deref().filter(|p| !p.is_empty()) {
        // A caller-supplied prompt replaces the compiled prompt entirely.
        Some(custom) => custom.to_string(),
        None => prompt::render(
            style.mode,
            &style.faders,
            &style.toggles,
            request.custom_instructions.as_deref(),
        ),
    };
    let model = resolve_model(request.model.as_deref(), headers, caller.provider);

    let result = state
        .dispatcher
        .dispatch(
            caller.provider,
            &caller.credential,
            Some(model),
            &system_prompt,
            input,
            request.max_tokens.filter(|&tokens| tokens > 0),
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "output": result.text,
        "meta": {
            "requestId": ctx.request_id,
            "provider": caller.provider,
            "model": result.model,
            "voiceMode": style.mode.key,
            "preset": preset,
            "duration": {
                "total": ctx.elapsed_label(),
                "ai": format!("{}ms", result.duration_ms),
            },
            "usage": result.usage,
            "timestamp": envelope::timestamp(),
        },
    }))
    .into_response())
}

/// POST /api/batch
pub(super) async fn batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::new();
    match batch_flow(&state, &headers, &body, &ctx).await {
        Ok(response) => response,
        Err(err) => envelope::failure(&ctx, &err),
    }
}

async fn batch_flow(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
    ctx: &RequestContext,
) -> Result<Response, GatewayError> {
    let caller = authenticate(headers)?;
    let request: BatchRequest = serde_json::from_slice(body)?;
    let items = request.items.unwrap_or_default();
    flows::check_batch_size(&items)?;

    let preset = request.preset.as_deref().filter(|name| !name.is_empty());
    let style = prompt::resolve_style(
        request.voice_mode.as_deref().unwrap_or(DEFAULT_VOICE_MODE),
        preset,
        &request.faders,
        &request.toggles,
    );
    let system_prompt = match request.custom_prompt.as_deref().filter(|p| !p.is_empty()) {
        Some(custom) => custom.to_string(),
        None => prompt::render(
            style.mode,
            &style.faders,
            &style.toggles,
            request.custom_instructions.as_deref(),
        ),
    };
    let model = resolve_model(request.model.as_deref(), headers, caller.provider);

    let outcome = flows::run_batch(
        &state.dispatcher,
        caller.provider,
        &caller.credential,
        model,
        &system_prompt,
        &items,
        request.parallelism,
    )
    .await;

    Ok(Json(json!({
        "success": outcome.summary.successful > 0,
        "summary": outcome.summary,
        "results": outcome.results,
        "meta": {
            "requestId": ctx.request_id,
            "provider": caller.provider,
            "model": model,
            "voiceMode": style.mode.key,
            "preset": preset,
            "parallelism": request.parallelism,
            "duration": ctx.elapsed_label(),
            "usage": outcome.usage,
            "timestamp": envelope::timestamp(),
        },
    }))
    .into_response())
}

/// POST /api/transform
pub(super) async fn transform(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::new();
    match transform_flow(&state, &headers, &body, &ctx).await {
        Ok(response) => response,
        Err(err) => envelope::failure(&ctx, &err),
    }
}

async fn transform_flow(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
    ctx: &RequestContext,
) -> Result<Response, GatewayError> {
    let caller = authenticate(headers)?;
    let request: TransformRequest = serde_json::from_slice(body)?;
    let input = require_input(request.input.as_deref())?;

    let mode_names = request.modes.unwrap_or_else(|| {
        defaults::DEFAULT_TRANSFORM_MODES
            .iter()
            .map(|name| name.to_string())
            .collect()
    });
    let modes = flows::select_modes(&mode_names)?;
    let model = resolve_model(request.model.as_deref(), headers, caller.provider);

    let outcome = flows::run_transform(
        &state.dispatcher,
        caller.provider,
        &caller.credential,
        model,
        input,
        &modes,
        &request.faders,
        &request.toggles,
    )
    .await;

    Ok(Json(json!({
        "success": outcome.summary.successful > 0,
        "input": input,
        "transformations": outcome.results,
        "summary": outcome.summary,
        "meta": {
            "requestId": ctx.request_id,
            "provider": caller.provider,
            "model": model,
            "duration": ctx.elapsed_label(),
            "usage": outcome.usage,
            "timestamp": envelope::timestamp(),
        },
    }))
    .into_response())
}

/// GET /api/modes
///
/// Catalog discovery for UI dropdowns. Mode persona prompts stay server-side.
pub(super) async fn modes() -> Response {
    let voice_modes: Map<String, Value> = catalog::VOICE_MODES
        .iter()
        .map(|mode| {
            (
                mode.key.to_string(),
                json!({
                    "id": mode.id,
                    "name": mode.name,
                    "emoji": mode.emoji,
                    "defaults": mode.defaults,
                }),
            )
        })
        .collect();

    let faders: Map<String, Value> = catalog::FADERS
        .iter()
        .map(|def| {
            (
                def.key.to_string(),
                json!({
                    "id": def.id,
                    "name": def.name,
                    "min": catalog::FADER_MIN,
                    "max": catalog::FADER_MAX,
                    "hint": { "low": def.low, "high": def.high },
                }),
            )
        })
        .collect();

    let toggles: Map<String, Value> = catalog::TOGGLES
        .iter()
        .map(|def| {
            (
                def.key.to_string(),
                json!({
                    "id": def.id,
                    "name": def.name,
                    "description": def.description,
                }),
            )
        })
        .collect();

    let presets: Map<String, Value> = catalog::PRESETS
        .iter()
        .map(|preset| {
            (
                preset.key.to_string(),
                json!({
                    "name": preset.name,
                    "mode": preset.mode,
                    "faders": preset.faders,
                    "toggles": preset.toggles,
                }),
            )
        })
        .collect();

    Json(json!({
        "voiceModes": voice_modes,
        "faders": faders,
        "toggles": toggles,
        "presets": presets,
        "providers": providers::available_models(),
    }))
    .into_response()
}

/// GET /api/health
pub(super) async fn health() -> Response {
    Json(json!({
        "status": "operational",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": envelope::timestamp(),
        "endpoints": {
            "/api/synthesize": "Single content synthesis with voice modes",
            "/api/batch": "Process multiple items (max 10)",
            "/api/transform": "Same input through multiple voice modes",
            "/api/health": "This endpoint",
            "/api/modes": "List all voice modes and presets",
        },
        "voiceModes": catalog::mode_names(),
        "presets": catalog::preset_names(),
        "providers": ProviderId::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
    }))
    .into_response()
}

/// CORS preflight for every route.
pub(super) async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// JSON 405 for any method a route does not serve.
pub(super) async fn method_not_allowed() -> Response {
    envelope::failure(&RequestContext::new(), &GatewayError::MethodNotAllowed)
}
