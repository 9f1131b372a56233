//! Prompt Compiler
//!
//! Turns a mode, partial overrides and optional custom instructions into the
//! system prompt sent upstream. Compilation is pure: the same inputs always
//! produce the same prompt, and resolved values render identically whether
//! they came from a baseline or an override.

use crate::catalog::{self, FADERS, FaderSettings, Toggles, VoiceMode};

pub use crate::catalog::{FaderOverrides, ToggleOverrides};

/// Slider value at or above which the console renders the high hint.
pub const HINT_HIGH: u8 = 8;
/// Slider value at or below which the console renders the low hint.
pub const HINT_LOW: u8 = 3;

/// Style resolved for one request: the active mode plus settled sliders and
/// toggles.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedStyle {
    pub mode: &'static VoiceMode,
    pub faders: FaderSettings,
    pub toggles: Toggles,
}

/// Applies the preset and override precedence chain for one request.
///
/// A known preset supersedes `mode_name` and supplies the slider baseline in
/// place of the mode defaults; sliders and toggles named in the request still
/// win over the preset. Unknown preset keys are ignored entirely.
pub fn resolve_style(
    mode_name: &str,
    preset: Option<&str>,
    faders: &FaderOverrides,
    toggles: &ToggleOverrides,
) -> ResolvedStyle {
    match preset.and_then(catalog::find_preset) {
        Some(preset) => ResolvedStyle {
            mode: catalog::lookup(preset.mode),
            faders: faders.resolve(&preset.faders),
            toggles: preset.toggles.overlay(toggles).resolve(&Toggles::default()),
        },
        None => {
            let mode = catalog::lookup(mode_name);
            ResolvedStyle {
                mode,
                faders: faders.resolve(&mode.defaults),
                toggles: toggles.resolve(&Toggles::default()),
            }
        }
    }
}

/// Compiles the system prompt for `mode_name`, falling back to the default
/// mode when the name is unknown.
pub fn build_system_prompt(
    mode_name: &str,
    faders: &FaderOverrides,
    toggles: &ToggleOverrides,
    custom_instructions: Option<&str>,
) -> String {
    let style = resolve_style(mode_name, None, faders, toggles);
    render(style.mode, &style.faders, &style.toggles, custom_instructions)
}

/// Renders the prompt from fully-resolved settings.
///
/// Block order is fixed: persona, linguistic console, toggles, output rules,
/// then the optional custom block.
pub fn render(
    mode: &VoiceMode,
    faders: &FaderSettings,
    toggles: &Toggles,
    custom_instructions: Option<&str>,
) -> String {
    let mut prompt = String::with_capacity(mode.prompt.len() + 512);
    prompt.push_str(mode.prompt);
    prompt.push_str("\n\n═══ LINGUISTIC CONSOLE ═══\n");
    for (def, value) in FADERS.iter().zip(faders.values()) {
        let hint = if value >= HINT_HIGH {
            def.hint_high
        } else if value <= HINT_LOW {
            def.hint_low
        } else {
            ""
        };
        prompt.push_str(&format!("• {}: {}/10 {}\n", def.name, value, hint));
    }
    prompt.push_str("\n═══ TOGGLES ═══\n");
    prompt.push_str(&format!("• Direct Address: {}\n", on_off(toggles.direct_address)));
    prompt.push_str(&format!("• Profanity: {}\n", on_off(toggles.profanity)));
    prompt.push_str(&format!("• Temporal Markers: {}\n", on_off(toggles.temporal_markers)));
    prompt.push_str(&format!("• Paradox Mode: {}\n", on_off(toggles.paradox)));
    prompt.push_str(
        "\n═══ OUTPUT RULES ═══\n\
         Transform the input through this voice mode and settings.\n\
         Maintain the CORE MESSAGE but adjust tone, word choice, structure.\n\
         Output ONLY the transformed text — NO meta-commentary.\n\
         Never say \"Here's the transformed version\" or similar.",
    );
    if let Some(custom) = custom_instructions {
        if !custom.is_empty() {
            prompt.push_str("\n\n═══ CUSTOM ═══\n");
            prompt.push_str(custom);
        }
    }
    prompt
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> (FaderOverrides, ToggleOverrides) {
        (FaderOverrides::default(), ToggleOverrides::default())
    }

    #[test]
    fn test_render_raw_defaults_exactly() {
        let (faders, toggles) = no_overrides();
        let prompt = build_system_prompt("Raw", &faders, &toggles, None);
        let tail = [
            "═══ LINGUISTIC CONSOLE ═══",
            "• Certainty: 8/10 → declarative, no hedges",
            "• Formality: 2/10 → casual, conversational",
            "• Intensity: 7/10 ",
            "• Intimacy: 8/10 → \"you\" language, personal",
            "• Abstraction: 3/10 → concrete, practical",
            "• Density: 5/10 ",
            "",
            "═══ TOGGLES ═══",
            "• Direct Address: ON",
            "• Profanity: OFF",
            "• Temporal Markers: ON",
            "• Paradox Mode: OFF",
            "",
            "═══ OUTPUT RULES ═══",
            "Transform the input through this voice mode and settings.",
            "Maintain the CORE MESSAGE but adjust tone, word choice, structure.",
            "Output ONLY the transformed text — NO meta-commentary.",
            "Never say \"Here's the transformed version\" or similar.",
        ]
        .join("\n");
        let expected = format!("{}\n\n{}", catalog::lookup("Raw").prompt, tail);
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_explicit_defaults_render_identically() {
        let defaults = catalog::lookup("Teacher").defaults;
        let explicit = FaderOverrides {
            certainty: Some(i64::from(defaults.certainty)),
            formality: Some(i64::from(defaults.formality)),
            intensity: Some(i64::from(defaults.intensity)),
            intimacy: Some(i64::from(defaults.intimacy)),
            abstraction: Some(i64::from(defaults.abstraction)),
            density: Some(i64::from(defaults.density)),
            ..Default::default()
        };
        let toggles = ToggleOverrides::default();
        assert_eq!(
            build_system_prompt("Teacher", &explicit, &toggles, None),
            build_system_prompt("Teacher", &FaderOverrides::default(), &toggles, None),
        );
    }

    #[test]
    fn test_hint_thresholds_are_exclusive_in_the_middle() {
        let toggles = ToggleOverrides::default();
        let at = |value: i64| {
            let faders = FaderOverrides {
                certainty: Some(value),
                ..Default::default()
            };
            build_system_prompt("Raw", &faders, &toggles, None)
        };
        assert!(at(8).contains("• Certainty: 8/10 → declarative, no hedges"));
        assert!(at(7).contains("• Certainty: 7/10 \n"));
        assert!(at(4).contains("• Certainty: 4/10 \n"));
        assert!(at(3).contains("• Certainty: 3/10 → exploratory, questions ok"));
    }

    #[test]
    fn test_out_of_range_values_clamp_into_hints() {
        let toggles = ToggleOverrides::default();
        let faders = FaderOverrides {
            certainty: Some(15),
            formality: Some(-2),
            ..Default::default()
        };
        let prompt = build_system_prompt("Raw", &faders, &toggles, None);
        assert!(prompt.contains("• Certainty: 10/10 → declarative, no hedges"));
        assert!(prompt.contains("• Formality: 1/10 → casual, conversational"));
    }

    #[test]
    fn test_alias_and_long_name_precedence() {
        let toggles = ToggleOverrides::default();
        let faders = FaderOverrides {
            certainty: Some(2),
            f1: Some(9),
            f3: Some(1),
            ..Default::default()
        };
        let prompt = build_system_prompt("Raw", &faders, &toggles, None);
        assert!(prompt.contains("• Certainty: 2/10"));
        assert!(prompt.contains("• Intensity: 1/10 → calm, measured"));
    }

    #[test]
    fn test_toggle_lines_flip() {
        let faders = FaderOverrides::default();
        let toggles = ToggleOverrides {
            direct_address: Some(false),
            profanity: Some(true),
            ..Default::default()
        };
        let prompt = build_system_prompt("Raw", &faders, &toggles, None);
        assert!(prompt.contains("• Direct Address: OFF"));
        assert!(prompt.contains("• Profanity: ON"));
        assert!(prompt.contains("• Temporal Markers: ON"));
        assert!(prompt.contains("• Paradox Mode: OFF"));
    }

    #[test]
    fn test_custom_instructions_block() {
        let (faders, toggles) = no_overrides();
        let with = build_system_prompt("Raw", &faders, &toggles, Some("Keep it under 100 words"));
        assert!(with.ends_with("═══ CUSTOM ═══\nKeep it under 100 words"));

        let without = build_system_prompt("Raw", &faders, &toggles, None);
        assert!(!without.contains("═══ CUSTOM ═══"));

        let empty = build_system_prompt("Raw", &faders, &toggles, Some(""));
        assert!(!empty.contains("═══ CUSTOM ═══"));
    }

    #[test]
    fn test_unknown_mode_falls_back_to_raw() {
        let (faders, toggles) = no_overrides();
        let prompt = build_system_prompt("NotAMode", &faders, &toggles, None);
        assert!(prompt.starts_with(catalog::lookup("Raw").prompt));
    }

    #[test]
    fn test_preset_supersedes_requested_mode() {
        let (faders, toggles) = no_overrides();
        let style = resolve_style("Teacher", Some("rawVulnerable"), &faders, &toggles);
        assert_eq!(style.mode.key, "Raw");
        assert_eq!(style.faders.intimacy, 10);
    }

    #[test]
    fn test_request_faders_win_over_preset_baseline() {
        let toggles = ToggleOverrides::default();
        let faders = FaderOverrides {
            certainty: Some(9),
            ..Default::default()
        };
        let style = resolve_style("Raw", Some("rawVulnerable"), &faders, &toggles);

        // Only the overridden slider moves off the preset vector.
        let mut expected = catalog::find_preset("rawVulnerable").unwrap().faders;
        expected.certainty = 9;
        assert_eq!(style.faders, expected);
    }

    #[test]
    fn test_request_alias_wins_over_preset_baseline() {
        let toggles = ToggleOverrides::default();
        let faders = FaderOverrides {
            f2: Some(9),
            ..Default::default()
        };
        let style = resolve_style("Raw", Some("rawVulnerable"), &faders, &toggles);
        assert_eq!(style.faders.formality, 9);
    }

    #[test]
    fn test_preset_toggles_sit_between_defaults_and_request() {
        let faders = FaderOverrides::default();
        let request = ToggleOverrides {
            paradox: Some(false),
            ..Default::default()
        };
        let style = resolve_style("Raw", Some("mysticTranscendent"), &faders, &request);
        assert!(!style.toggles.direct_address);
        assert!(!style.toggles.paradox);
        assert!(style.toggles.temporal_markers);
    }

    #[test]
    fn test_unknown_preset_is_ignored() {
        let (faders, toggles) = no_overrides();
        let style = resolve_style("Teacher", Some("notAPreset"), &faders, &toggles);
        assert_eq!(style.mode.key, "Teacher");
        assert_eq!(style.faders, catalog::lookup("Teacher").defaults);
    }
}
