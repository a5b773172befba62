// ChatCut - core/style.rs
//
// Presentation state as pure data: background presets, bubble and name
// palettes, and the per-session StyleConfig.
// Core layer: no drawing here — the host consumes these values when it
// rasterizes a composed document.
//
// Participant colours are pure functions of (participant, participant
// list), never of a mutable list's current index.

use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// Background presets
// =============================================================================

/// One background theme: page, text and chrome colours as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub bg: &'static str,
    pub text: &'static str,
    pub sub: &'static str,
    pub date_bg: &'static str,
    pub watermark: &'static str,
    pub border: &'static str,
}

/// The selectable background themes, in display order.
pub const BACKGROUND_PRESETS: [BackgroundPreset; 5] = [
    BackgroundPreset {
        id: "white",
        label: "ホワイト",
        bg: "#F7F8FA",
        text: "#222222",
        sub: "#888888",
        date_bg: "#ECEEF2",
        watermark: "#BBBBBB",
        border: "#E0E0E0",
    },
    BackgroundPreset {
        id: "green",
        label: "グリーン",
        bg: "#D9EFD2",
        text: "#1A3A15",
        sub: "#5C8055",
        date_bg: "#C5E3BC",
        watermark: "#8CB883",
        border: "#B0D4A6",
    },
    BackgroundPreset {
        id: "craft",
        label: "クラフト",
        bg: "#F5F0E8",
        text: "#3D3225",
        sub: "#8C7B6B",
        date_bg: "#EDE7DB",
        watermark: "#C4A97D",
        border: "#E0D5C5",
    },
    BackgroundPreset {
        id: "dark",
        label: "ダーク",
        bg: "#1A1A2E",
        text: "#F0F0F0",
        sub: "#999999",
        date_bg: "#2A2A3E",
        watermark: "#555555",
        border: "#333333",
    },
    BackgroundPreset {
        id: "sky",
        label: "スカイ",
        bg: "#E3EEF8",
        text: "#1A2A3E",
        sub: "#7799AA",
        date_bg: "#D4E4F0",
        watermark: "#99BBDD",
        border: "#B0CCE0",
    },
];

/// Preset used for fresh sessions.
pub const DEFAULT_BACKGROUND_ID: &str = "craft";

/// Look up a preset by id.
pub fn background_preset(id: &str) -> Option<&'static BackgroundPreset> {
    BACKGROUND_PRESETS.iter().find(|p| p.id == id)
}

// =============================================================================
// Bubble and name palettes
// =============================================================================

/// Bubble fill colours offered to the user and cycled for defaults.
pub const BUBBLE_PALETTE: [&str; 9] = [
    "#FFFFFF", "#DCF8C6", "#BDE0FE", "#FFD6A5", "#E8D5F5", "#FFB3C1", "#C5E8D0", "#F0E68C",
    "#D4E7F1",
];

/// Bubble colour assigned to the self participant by default.
pub const SELF_BUBBLE_COLOR: &str = "#DCF8C6";

/// Name-label colours cycled across participants.
pub const NAME_PALETTE: [&str; 6] = [
    "#5A7A3E", "#3E6A7A", "#8B5A3A", "#6A3E7A", "#7A6A3E", "#3E7A6A",
];

/// Name-label colour for a participant, stable for a given participant list.
pub fn name_color(name: &str, participants: &[String]) -> &'static str {
    NAME_PALETTE[participant_index(name, participants) % NAME_PALETTE.len()]
}

/// Default bubble colour for a participant with no explicit choice.
pub fn default_bubble_color(name: &str, participants: &[String]) -> &'static str {
    BUBBLE_PALETTE[participant_index(name, participants) % BUBBLE_PALETTE.len()]
}

fn participant_index(name: &str, participants: &[String]) -> usize {
    participants
        .iter()
        .position(|p| p == name)
        .unwrap_or_default()
}

// =============================================================================
// Style configuration
// =============================================================================

/// Presentation state for one editing session: chosen background, explicit
/// per-participant bubble colours, and timestamp visibility.
///
/// Consumed as an opaque value by the compose/export boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleConfig {
    pub background: BackgroundPreset,
    pub bubble_colors: BTreeMap<String, String>,
    pub show_timestamps: bool,
}

impl StyleConfig {
    /// Defaults for a fresh clip: craft background, green bubble for the
    /// self participant, white for everyone else, timestamps shown.
    pub fn for_clip(participants: &[String], self_name: Option<&str>) -> Self {
        let mut bubble_colors = BTreeMap::new();
        for participant in participants {
            let color = if Some(participant.as_str()) == self_name {
                SELF_BUBBLE_COLOR
            } else {
                "#FFFFFF"
            };
            bubble_colors.insert(participant.clone(), color.to_string());
        }
        Self {
            background: *background_preset(DEFAULT_BACKGROUND_ID)
                .unwrap_or(&BACKGROUND_PRESETS[0]),
            bubble_colors,
            show_timestamps: true,
        }
    }

    /// Bubble colour for `name`, falling back to the palette default when
    /// the user has not picked one.
    pub fn bubble_color<'a>(&'a self, name: &str, participants: &[String]) -> &'a str {
        self.bubble_colors
            .get(name)
            .map(String::as_str)
            .unwrap_or_else(|| default_bubble_color(name, participants))
    }

    /// Replace the background theme.
    pub fn with_background(mut self, preset: BackgroundPreset) -> Self {
        self.background = preset;
        self
    }

    /// Pick an explicit bubble colour for one participant.
    pub fn with_bubble_color(mut self, name: &str, color: &str) -> Self {
        self.bubble_colors
            .insert(name.to_string(), color.to_string());
        self
    }

    /// Show or hide timestamps next to bubbles.
    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants() -> Vec<String> {
        vec!["たくや".to_string(), "ゆうこ".to_string(), "けんた".to_string()]
    }

    #[test]
    fn name_colors_are_stable_per_participant_list() {
        let parts = participants();
        assert_eq!(name_color("たくや", &parts), NAME_PALETTE[0]);
        assert_eq!(name_color("ゆうこ", &parts), NAME_PALETTE[1]);
        assert_eq!(name_color("けんた", &parts), NAME_PALETTE[2]);
        // Same input, same output — a pure lookup, not list-state.
        assert_eq!(name_color("ゆうこ", &parts), name_color("ゆうこ", &parts));
    }

    #[test]
    fn palettes_wrap_for_long_participant_lists() {
        let parts: Vec<String> = (0..8).map(|i| format!("p{i}")).collect();
        assert_eq!(name_color("p6", &parts), NAME_PALETTE[0]);
        assert_eq!(default_bubble_color("p7", &parts), BUBBLE_PALETTE[7]);
    }

    #[test]
    fn default_style_marks_the_self_participant() {
        let parts = participants();
        let style = StyleConfig::for_clip(&parts, Some("ゆうこ"));
        assert_eq!(style.bubble_colors["ゆうこ"], SELF_BUBBLE_COLOR);
        assert_eq!(style.bubble_colors["たくや"], "#FFFFFF");
        assert!(style.show_timestamps);
        assert_eq!(style.background.id, "craft");
    }

    #[test]
    fn bubble_color_falls_back_to_palette_default() {
        let parts = participants();
        let style = StyleConfig {
            bubble_colors: BTreeMap::new(),
            ..StyleConfig::for_clip(&parts, None)
        };
        assert_eq!(
            style.bubble_color("けんた", &parts),
            default_bubble_color("けんた", &parts)
        );
    }

    #[test]
    fn style_updates_replace_the_value() {
        let parts = participants();
        let style = StyleConfig::for_clip(&parts, None)
            .with_background(BACKGROUND_PRESETS[3])
            .with_bubble_color("たくや", "#FFB3C1")
            .with_timestamps(false);
        assert_eq!(style.background.id, "dark");
        assert_eq!(style.bubble_colors["たくや"], "#FFB3C1");
        assert!(!style.show_timestamps);
    }

    #[test]
    fn every_preset_id_resolves() {
        for preset in &BACKGROUND_PRESETS {
            assert_eq!(background_preset(preset.id), Some(preset));
        }
        assert!(background_preset("neon").is_none());
    }
}
