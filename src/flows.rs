//! Fan-Out Flows
//!
//! Orchestration for the batch and multi-mode flows. Units fail
//! independently: one bad item or one upstream rejection never aborts the
//! flow, it just lands as a failed unit in the results array.

use std::sync::Arc;

use futures::future::join_all;
use secrecy::SecretString;
use tokio::sync::Semaphore;

use crate::catalog::{self, VoiceMode};
use crate::defaults;
use crate::dispatch::Dispatcher;
use crate::error::GatewayError;
use crate::prompt::{self, FaderOverrides, ToggleOverrides};
use crate::providers::ProviderId;
use crate::types::{BatchItem, ItemResult, ModeResult, Parallelism, Summary, Usage};

/// Aggregated outcome of a batch flow.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<ItemResult>,
    /// Token usage summed over the successful units.
    pub usage: Usage,
    pub summary: Summary,
}

/// Aggregated outcome of a multi-mode flow.
#[derive(Debug)]
pub struct TransformOutcome {
    pub results: Vec<ModeResult>,
    pub usage: Usage,
    pub summary: Summary,
}

/// Validates batch item presence and the item cap.
pub fn check_batch_size(items: &[BatchItem]) -> Result<(), GatewayError> {
    if items.is_empty() {
        return Err(GatewayError::MissingItems);
    }
    if items.len() > defaults::MAX_BATCH_ITEMS {
        return Err(GatewayError::BatchTooLarge {
            received: items.len(),
        });
    }
    Ok(())
}

/// Filters unknown mode names, then enforces the mode cap on what is left.
pub fn select_modes(names: &[String]) -> Result<Vec<&'static VoiceMode>, GatewayError> {
    let valid: Vec<&'static VoiceMode> =
        names.iter().filter_map(|name| catalog::find(name)).collect();
    if valid.is_empty() {
        return Err(GatewayError::NoValidModes);
    }
    if valid.len() > defaults::MAX_TRANSFORM_MODES {
        return Err(GatewayError::TooManyModes {
            received: valid.len(),
        });
    }
    Ok(valid)
}

/// Runs every batch item against one compiled prompt.
///
/// Sequential runs settle each unit before starting the next. Parallel runs
/// start all units at once, bounded by a semaphore sized to the batch cap,
/// and the results vector preserves input order either way.
pub async fn run_batch(
    dispatcher: &Dispatcher,
    provider: ProviderId,
    credential: &SecretString,
    model: &str,
    system_prompt: &str,
    items: &[BatchItem],
    parallelism: Parallelism,
) -> BatchOutcome {
    let results = match parallelism {
        Parallelism::Sequential => {
            let mut results = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                results.push(
                    process_item(dispatcher, provider, credential, model, system_prompt, index, item)
                        .await,
                );
            }
            results
        }
        Parallelism::Parallel => {
            let limiter = Arc::new(Semaphore::new(defaults::MAX_BATCH_ITEMS));
            let units = items.iter().enumerate().map(|(index, item)| {
                let limiter = Arc::clone(&limiter);
                async move {
                    // Bounds in-flight upstream calls to the batch cap.
                    let _permit = limiter.acquire().await.ok();
                    process_item(dispatcher, provider, credential, model, system_prompt, index, item)
                        .await
                }
            });
            join_all(units).await
        }
    };

    let mut usage = Usage::default();
    for result in &results {
        if let Some(item_usage) = &result.usage {
            usage.accumulate(item_usage);
        }
    }
    let summary = Summary::tally(&results, |r| r.success);
    BatchOutcome {
        results,
        usage,
        summary,
    }
}

async fn process_item(
    dispatcher: &Dispatcher,
    provider: ProviderId,
    credential: &SecretString,
    model: &str,
    system_prompt: &str,
    index: usize,
    item: &BatchItem,
) -> ItemResult {
    let title = item.title(index);
    let input = match item.input() {
        Some(text) if !text.trim().is_empty() => text,
        // Failed units never reach the provider, and carry no input echo.
        _ => {
            return ItemResult {
                index,
                title,
                success: false,
                input: None,
                output: None,
                usage: None,
                duration: None,
                error: Some("Empty input".to_string()),
            };
        }
    };

    match dispatcher
        .dispatch(provider, credential, Some(model), system_prompt, input, None)
        .await
    {
        Ok(result) => ItemResult {
            index,
            title,
            success: true,
            input: Some(input.to_string()),
            output: Some(result.text),
            usage: Some(result.usage),
            duration: Some(result.duration_ms),
            error: None,
        },
        Err(err) => ItemResult {
            index,
            title,
            success: false,
            input: Some(input.to_string()),
            output: None,
            usage: None,
            duration: None,
            error: Some(err.to_string()),
        },
    }
}

/// Runs one input through each mode in sequence, compiling a fresh prompt
/// per mode from the shared overrides.
pub async fn run_transform(
    dispatcher: &Dispatcher,
    provider: ProviderId,
    credential: &SecretString,
    model: &str,
    input: &str,
    modes: &[&'static VoiceMode],
    faders: &FaderOverrides,
    toggles: &ToggleOverrides,
) -> TransformOutcome {
    let mut results = Vec::with_capacity(modes.len());
    let mut usage = Usage::default();

    for mode in modes {
        let system_prompt = prompt::build_system_prompt(mode.key, faders, toggles, None);
        match dispatcher
            .dispatch(provider, credential, Some(model), &system_prompt, input, None)
            .await
        {
            Ok(result) => {
                usage.accumulate(&result.usage);
                results.push(ModeResult {
                    mode: mode.key,
                    mode_emoji: mode.emoji,
                    mode_name: mode.name,
                    success: true,
                    output: Some(result.text),
                    duration: Some(result.duration_ms),
                    error: None,
                });
            }
            Err(err) => results.push(ModeResult {
                mode: mode.key,
                mode_emoji: mode.emoji,
                mode_name: mode.name,
                success: false,
                output: None,
                duration: None,
                error: Some(err.to_string()),
            }),
        }
    }

    let summary = Summary::tally(&results, |r| r.success);
    TransformOutcome {
        results,
        usage,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_check_batch_size() {
        assert!(matches!(
            check_batch_size(&[]),
            Err(GatewayError::MissingItems)
        ));

        let ok: Vec<BatchItem> = (0..10).map(|i| BatchItem::Text(format!("item {i}"))).collect();
        assert!(check_batch_size(&ok).is_ok());

        let over: Vec<BatchItem> = (0..11).map(|i| BatchItem::Text(format!("item {i}"))).collect();
        assert!(matches!(
            check_batch_size(&over),
            Err(GatewayError::BatchTooLarge { received: 11 })
        ));
    }

    #[test]
    fn test_select_modes_filters_unknown_names() {
        let modes = select_modes(&names(&["Raw", "Bogus", "Teacher"])).unwrap();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[0].key, "Raw");
        assert_eq!(modes[1].key, "Teacher");
    }

    #[test]
    fn test_select_modes_rejects_all_unknown() {
        assert!(matches!(
            select_modes(&names(&["Nope", "AlsoNope"])),
            Err(GatewayError::NoValidModes)
        ));
        assert!(matches!(select_modes(&[]), Err(GatewayError::NoValidModes)));
    }

    #[test]
    fn test_select_modes_caps_after_filtering() {
        // Six known plus one unknown: the unknown is dropped first, so six
        // valid modes remain and the cap fires.
        let result = select_modes(&names(&[
            "Raw", "Teacher", "Prophet", "Mystic", "Rebel", "Bogus", "Lyrical",
        ]));
        assert!(matches!(
            result,
            Err(GatewayError::TooManyModes { received: 6 })
        ));

        // Five known plus unknowns is fine.
        let modes = select_modes(&names(&[
            "Raw", "Teacher", "Prophet", "Mystic", "Bogus", "Rebel",
        ]))
        .unwrap();
        assert_eq!(modes.len(), 5);
    }
}
