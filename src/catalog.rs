//! Style Catalog
//!
//! Single source of truth for voice modes, faders, toggles and presets. The
//! prompt compiler and the discovery endpoint both read from here; nothing
//! mutates this data at runtime.

use serde::{Deserialize, Serialize};

/// Lowest value a fader accepts.
pub const FADER_MIN: u8 = 1;
/// Highest value a fader accepts.
pub const FADER_MAX: u8 = 10;

/// A fully-resolved six-slider style vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaderSettings {
    pub certainty: u8,
    pub formality: u8,
    pub intensity: u8,
    pub intimacy: u8,
    pub abstraction: u8,
    pub density: u8,
}

impl FaderSettings {
    /// Slider values in catalog order, aligned with [`FADERS`].
    pub fn values(&self) -> [u8; 6] {
        [
            self.certainty,
            self.formality,
            self.intensity,
            self.intimacy,
            self.abstraction,
            self.density,
        ]
    }
}

/// Fully-resolved toggle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub direct_address: bool,
    pub profanity: bool,
    pub temporal_markers: bool,
    pub paradox: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            direct_address: true,
            profanity: false,
            temporal_markers: true,
            paradox: false,
        }
    }
}

/// Partial fader overrides as supplied on the wire.
///
/// Each slider accepts its long name or its positional `f1`..`f6` alias. The
/// long name wins when both appear in the same request.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct FaderOverrides {
    pub certainty: Option<i64>,
    pub formality: Option<i64>,
    pub intensity: Option<i64>,
    pub intimacy: Option<i64>,
    pub abstraction: Option<i64>,
    pub density: Option<i64>,
    pub f1: Option<i64>,
    pub f2: Option<i64>,
    pub f3: Option<i64>,
    pub f4: Option<i64>,
    pub f5: Option<i64>,
    pub f6: Option<i64>,
}

impl FaderOverrides {
    /// Resolves against `baseline`, clamping supplied values into the
    /// `1..=10` slider range.
    pub fn resolve(&self, baseline: &FaderSettings) -> FaderSettings {
        FaderSettings {
            certainty: pick(self.certainty, self.f1, baseline.certainty),
            formality: pick(self.formality, self.f2, baseline.formality),
            intensity: pick(self.intensity, self.f3, baseline.intensity),
            intimacy: pick(self.intimacy, self.f4, baseline.intimacy),
            abstraction: pick(self.abstraction, self.f5, baseline.abstraction),
            density: pick(self.density, self.f6, baseline.density),
        }
    }
}

fn pick(long: Option<i64>, alias: Option<i64>, baseline: u8) -> u8 {
    long.or(alias).map(clamp).unwrap_or(baseline)
}

fn clamp(value: i64) -> u8 {
    value.clamp(i64::from(FADER_MIN), i64::from(FADER_MAX)) as u8
}

/// Partial toggle overrides, as supplied on the wire and stored in presets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_address: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profanity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_markers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paradox: Option<bool>,
}

impl ToggleOverrides {
    /// Returns a copy where fields set in `over` win over fields set here.
    pub fn overlay(&self, over: &ToggleOverrides) -> ToggleOverrides {
        ToggleOverrides {
            direct_address: over.direct_address.or(self.direct_address),
            profanity: over.profanity.or(self.profanity),
            temporal_markers: over.temporal_markers.or(self.temporal_markers),
            paradox: over.paradox.or(self.paradox),
        }
    }

    /// Resolves against the default polarities.
    pub fn resolve(&self, defaults: &Toggles) -> Toggles {
        Toggles {
            direct_address: self.direct_address.unwrap_or(defaults.direct_address),
            profanity: self.profanity.unwrap_or(defaults.profanity),
            temporal_markers: self.temporal_markers.unwrap_or(defaults.temporal_markers),
            paradox: self.paradox.unwrap_or(defaults.paradox),
        }
    }
}

/// One named style template.
#[derive(Debug)]
pub struct VoiceMode {
    /// Catalog lookup key, e.g. `"Raw"`.
    pub key: &'static str,
    /// Stable lowercase identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub emoji: &'static str,
    /// Persona block placed at the top of the compiled system prompt.
    pub prompt: &'static str,
    /// Slider baseline when the request overrides nothing.
    pub defaults: FaderSettings,
}

/// One fader definition, for discovery and console rendering.
#[derive(Debug)]
pub struct FaderDef {
    /// Long request key, e.g. `"certainty"`.
    pub key: &'static str,
    /// Positional alias, `"f1"`..`"f6"`.
    pub id: &'static str,
    /// Console display name.
    pub name: &'static str,
    /// One-word gloss for the low end.
    pub low: &'static str,
    /// One-word gloss for the high end.
    pub high: &'static str,
    /// Console hint rendered at or below the low threshold.
    pub hint_low: &'static str,
    /// Console hint rendered at or above the high threshold.
    pub hint_high: &'static str,
}

/// One toggle definition, for discovery.
#[derive(Debug)]
pub struct ToggleDef {
    pub key: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A saved slider/toggle bundle bound to a mode.
#[derive(Debug)]
pub struct Preset {
    /// Catalog lookup key, e.g. `"rawVulnerable"`.
    pub key: &'static str,
    pub name: &'static str,
    /// Mode this preset activates, superseding the request's own mode.
    pub mode: &'static str,
    /// Full slider baseline replacing the mode defaults.
    pub faders: FaderSettings,
    /// Partial toggle layer under any request toggles.
    pub toggles: ToggleOverrides,
}

pub static VOICE_MODES: [VoiceMode; 10] = [
    VoiceMode {
        key: "Raw",
        id: "raw",
        name: "Raw Mode",
        emoji: "🔥",
        prompt: "You are channeling RAW MODE — unfiltered, stream-of-consciousness, primal truth.\n\
                 No polish. No diplomacy. Say what needs to be said with zero fucks given.\n\
                 Short sentences. Punchy. Direct hits. Profanity allowed when it serves.\n\
                 Fragments welcome. 'And' sentences welcome. This is how humans actually think.",
        defaults: FaderSettings {
            certainty: 8,
            formality: 2,
            intensity: 7,
            intimacy: 8,
            abstraction: 3,
            density: 5,
        },
    },
    VoiceMode {
        key: "Teacher",
        id: "teacher",
        name: "Teacher Mode",
        emoji: "📚",
        prompt: "You are channeling TEACHER MODE — clear, patient, methodical instruction.\n\
                 Break complex ideas into digestible steps. Use analogies from everyday life.\n\
                 Build understanding progressively. Assume intelligence but not prior knowledge.\n\
                 'Bring a compass, not a GPS' — give principles, not just procedures.",
        defaults: FaderSettings {
            certainty: 7,
            formality: 5,
            intensity: 5,
            intimacy: 6,
            abstraction: 4,
            density: 6,
        },
    },
    VoiceMode {
        key: "Prophet",
        id: "prophet",
        name: "Prophet Mode",
        emoji: "🔮",
        prompt: "You are channeling PROPHET MODE — speaking timeless truths with absolute conviction.\n\
                 You see patterns others miss. You speak of what IS, not what might be.\n\
                 Declarative statements. No hedging. Ancient wisdom meets modern clarity.\n\
                 'You will fall. You will rise. This is physics, not prediction.'",
        defaults: FaderSettings {
            certainty: 10,
            formality: 6,
            intensity: 8,
            intimacy: 5,
            abstraction: 7,
            density: 8,
        },
    },
    VoiceMode {
        key: "Philosopher",
        id: "philosopher",
        name: "Philosopher Mode",
        emoji: "🌀",
        prompt: "You are channeling PHILOSOPHER MODE — deep inquiry, structured thought, precise language.\n\
                 Examine assumptions. Define terms carefully. Build arguments step by step.\n\
                 Question the obvious. Find paradoxes. But always land on actionable insight.\n\
                 'Humans run in straight lines. Souls spiral.'",
        defaults: FaderSettings {
            certainty: 6,
            formality: 7,
            intensity: 4,
            intimacy: 4,
            abstraction: 9,
            density: 9,
        },
    },
    VoiceMode {
        key: "Mystic",
        id: "mystic",
        name: "Mystic Mode",
        emoji: "✨",
        prompt: "You are channeling MYSTIC MODE — poetic, metaphorical, touching the ineffable.\n\
                 Speak in images and sensations. Let the reader feel before they understand.\n\
                 Paradox is your friend. Silence between words matters.\n\
                 'The soul knows what the mind forgets.'",
        defaults: FaderSettings {
            certainty: 5,
            formality: 4,
            intensity: 6,
            intimacy: 7,
            abstraction: 10,
            density: 4,
        },
    },
    VoiceMode {
        key: "Rebel",
        id: "rebel",
        name: "Rebel Mode",
        emoji: "⚡",
        prompt: "You are channeling REBEL MODE — challenging orthodoxy, breaking rules, punk energy.\n\
                 Question everything 'they' told you. Call out bullshit systems and beliefs.\n\
                 Irreverent but not nihilistic — you break things to build better.\n\
                 'Fuck your five-year plan. Burn the map.'",
        defaults: FaderSettings {
            certainty: 9,
            formality: 1,
            intensity: 9,
            intimacy: 7,
            abstraction: 3,
            density: 6,
        },
    },
    VoiceMode {
        key: "Companion",
        id: "companion",
        name: "Companion Mode",
        emoji: "🤝",
        prompt: "You are channeling COMPANION MODE — warm, supportive, walking alongside.\n\
                 You're a trusted friend on the same journey. Vulnerability allowed.\n\
                 Share struggles and breakthroughs. 'We' language over 'you should.'\n\
                 'We're all figuring this out together.'",
        defaults: FaderSettings {
            certainty: 5,
            formality: 3,
            intensity: 5,
            intimacy: 9,
            abstraction: 4,
            density: 5,
        },
    },
    VoiceMode {
        key: "Confessor",
        id: "confessor",
        name: "Confessor Mode",
        emoji: "💭",
        prompt: "You are channeling CONFESSOR MODE — intimate, honest, soul-deep truth-telling.\n\
                 Speak the things people think but don't say. Name the shadow.\n\
                 Gentle with the person, fierce with the lie. Create space for honesty.\n\
                 'I lost everything. Again. Third time in two years.'",
        defaults: FaderSettings {
            certainty: 6,
            formality: 2,
            intensity: 7,
            intimacy: 10,
            abstraction: 5,
            density: 4,
        },
    },
    VoiceMode {
        key: "Technical",
        id: "technical",
        name: "Technical Mode",
        emoji: "🔧",
        prompt: "You are channeling TECHNICAL MODE — frameworks, systems, precise architecture.\n\
                 Structure over vocabulary. Clear hierarchies. Numbered steps when appropriate.\n\
                 Define components and their relationships. Show the system, not just the parts.\n\
                 'The regression framework has four components...'",
        defaults: FaderSettings {
            certainty: 8,
            formality: 8,
            intensity: 3,
            intimacy: 2,
            abstraction: 6,
            density: 8,
        },
    },
    VoiceMode {
        key: "Lyrical",
        id: "lyrical",
        name: "Lyrical Mode",
        emoji: "🎵",
        prompt: "You are channeling LYRICAL MODE — musical, rhythmic, wavelike flow.\n\
                 Long sentences that breathe. Repetition as rhythm. Extended metaphors that build.\n\
                 Let the words carry music. Prose that could be spoken aloud.\n\
                 'Like water remembering its way back to the ocean...'",
        defaults: FaderSettings {
            certainty: 5,
            formality: 5,
            intensity: 6,
            intimacy: 6,
            abstraction: 7,
            density: 3,
        },
    },
];

pub static FADERS: [FaderDef; 6] = [
    FaderDef {
        key: "certainty",
        id: "f1",
        name: "Certainty",
        low: "exploratory",
        high: "declarative",
        hint_low: "→ exploratory, questions ok",
        hint_high: "→ declarative, no hedges",
    },
    FaderDef {
        key: "formality",
        id: "f2",
        name: "Formality",
        low: "casual",
        high: "structured",
        hint_low: "→ casual, conversational",
        hint_high: "→ structured, professional",
    },
    FaderDef {
        key: "intensity",
        id: "f3",
        name: "Intensity",
        low: "calm",
        high: "passionate",
        hint_low: "→ calm, measured",
        hint_high: "→ urgent, passionate",
    },
    FaderDef {
        key: "intimacy",
        id: "f4",
        name: "Intimacy",
        low: "universal",
        high: "personal",
        hint_low: "→ universal, observational",
        hint_high: "→ \"you\" language, personal",
    },
    FaderDef {
        key: "abstraction",
        id: "f5",
        name: "Abstraction",
        low: "concrete",
        high: "philosophical",
        hint_low: "→ concrete, practical",
        hint_high: "→ conceptual, philosophical",
    },
    FaderDef {
        key: "density",
        id: "f6",
        name: "Density",
        low: "spacious",
        high: "compressed",
        hint_low: "→ spacious, single focus",
        hint_high: "→ compressed, idea-rich",
    },
];

pub static TOGGLES: [ToggleDef; 4] = [
    ToggleDef {
        key: "directAddress",
        id: "t1",
        name: "Direct Address",
        description: "Use \"you\" language",
    },
    ToggleDef {
        key: "profanity",
        id: "t2",
        name: "Profanity Allowed",
        description: "Swearing when it serves",
    },
    ToggleDef {
        key: "temporalMarkers",
        id: "t3",
        name: "Temporal Markers",
        description: "Include dates/context",
    },
    ToggleDef {
        key: "paradox",
        id: "t4",
        name: "Paradox Mode",
        description: "Embrace contradiction",
    },
];

pub static PRESETS: [Preset; 6] = [
    Preset {
        key: "rawVulnerable",
        name: "Raw Vulnerable",
        mode: "Raw",
        faders: FaderSettings {
            certainty: 6,
            formality: 1,
            intensity: 8,
            intimacy: 10,
            abstraction: 3,
            density: 4,
        },
        toggles: ToggleOverrides {
            direct_address: Some(true),
            profanity: Some(true),
            temporal_markers: None,
            paradox: None,
        },
    },
    Preset {
        key: "peakTeacher",
        name: "Peak Teacher",
        mode: "Teacher",
        faders: FaderSettings {
            certainty: 8,
            formality: 5,
            intensity: 6,
            intimacy: 7,
            abstraction: 4,
            density: 7,
        },
        toggles: ToggleOverrides {
            direct_address: Some(true),
            profanity: Some(false),
            temporal_markers: None,
            paradox: None,
        },
    },
    Preset {
        key: "mysticTranscendent",
        name: "Mystic Transcendent",
        mode: "Mystic",
        faders: FaderSettings {
            certainty: 4,
            formality: 4,
            intensity: 7,
            intimacy: 6,
            abstraction: 10,
            density: 3,
        },
        toggles: ToggleOverrides {
            direct_address: Some(false),
            profanity: None,
            temporal_markers: None,
            paradox: Some(true),
        },
    },
    Preset {
        key: "rebelFire",
        name: "Rebel Fire",
        mode: "Rebel",
        faders: FaderSettings {
            certainty: 10,
            formality: 1,
            intensity: 10,
            intimacy: 8,
            abstraction: 2,
            density: 6,
        },
        toggles: ToggleOverrides {
            direct_address: Some(true),
            profanity: Some(true),
            temporal_markers: None,
            paradox: None,
        },
    },
    Preset {
        key: "instagramCaption",
        name: "Instagram Caption",
        mode: "Raw",
        faders: FaderSettings {
            certainty: 7,
            formality: 2,
            intensity: 6,
            intimacy: 8,
            abstraction: 4,
            density: 7,
        },
        toggles: ToggleOverrides {
            direct_address: Some(true),
            profanity: Some(false),
            temporal_markers: None,
            paradox: None,
        },
    },
    Preset {
        key: "bookChapter",
        name: "Book Chapter",
        mode: "Teacher",
        faders: FaderSettings {
            certainty: 7,
            formality: 6,
            intensity: 5,
            intimacy: 6,
            abstraction: 5,
            density: 6,
        },
        toggles: ToggleOverrides {
            direct_address: Some(true),
            profanity: Some(false),
            temporal_markers: None,
            paradox: None,
        },
    },
];

/// Exact-match mode lookup. Keys are case-sensitive.
pub fn find(name: &str) -> Option<&'static VoiceMode> {
    VOICE_MODES.iter().find(|mode| mode.key == name)
}

/// Mode lookup that falls back to the default mode for unknown names.
pub fn lookup(name: &str) -> &'static VoiceMode {
    find(name).unwrap_or(&VOICE_MODES[0])
}

/// Exact-match preset lookup.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.key == name)
}

/// Mode keys in catalog order.
pub fn mode_names() -> Vec<&'static str> {
    VOICE_MODES.iter().map(|mode| mode.key).collect()
}

/// Preset keys in catalog order.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|preset| preset.key).collect()
}
