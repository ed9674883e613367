//! Callout Block Presets
//!
//! Named default bundles of label/icon/color for the common protocol callout
//! types. A callout block references a preset by id and may override any of
//! its attributes per-instance; the renderer resolves the chain
//! instance -> preset -> hard default.
//!
//! Icon identifiers are plain strings so the table stays independent of
//! whatever icon toolkit the frontend uses.

use crate::models::CalloutVariant;

/// Fallback label when neither the instance nor a preset provides one
pub const DEFAULT_CALLOUT_LABEL: &str = "Callout";
/// Fallback accent color (sky blue)
pub const DEFAULT_CALLOUT_COLOR: &str = "#0ea5e9";
/// Fallback icon identifier
pub const DEFAULT_CALLOUT_ICON: &str = "circle-info";

/// Preset configuration for a callout block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalloutPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Accent color (hex)
    pub color: &'static str,
    /// Background color (light mode)
    pub bg_color: &'static str,
    /// Background color (dark mode)
    pub dark_bg_color: &'static str,
    /// Border color (light mode)
    pub border_color: &'static str,
    /// Border color (dark mode)
    pub dark_border_color: &'static str,
    pub variant: CalloutVariant,
}

/// The seven shipped presets
pub const CALLOUT_PRESETS: [CalloutPreset; 7] = [
    CalloutPreset {
        id: "medicalControl",
        label: "Medical Control",
        icon: "triangle-exclamation",
        color: "#d97706",
        bg_color: "#fef3c7",
        dark_bg_color: "#78350f20",
        border_color: "#f59e0b",
        dark_border_color: "#d97706",
        variant: CalloutVariant::Callout,
    },
    CalloutPreset {
        id: "physicianOnly",
        label: "Physician Only",
        icon: "lock",
        color: "#9333ea",
        bg_color: "#f3e8ff",
        dark_bg_color: "#581c8720",
        border_color: "#a855f7",
        dark_border_color: "#9333ea",
        variant: CalloutVariant::Callout,
    },
    CalloutPreset {
        id: "important",
        label: "Important",
        icon: "circle-exclamation",
        color: "#dc2626",
        bg_color: "#fee2e2",
        dark_bg_color: "#7f1d1d20",
        border_color: "#ef4444",
        dark_border_color: "#dc2626",
        variant: CalloutVariant::Callout,
    },
    CalloutPreset {
        id: "note",
        label: "Note",
        icon: "circle-info",
        color: "#2563eb",
        bg_color: "#dbeafe",
        dark_bg_color: "#1e3a8a20",
        border_color: "#3b82f6",
        dark_border_color: "#2563eb",
        variant: CalloutVariant::Callout,
    },
    CalloutPreset {
        id: "tip",
        label: "Tip / Pearl",
        icon: "lightbulb",
        color: "#16a34a",
        bg_color: "#dcfce7",
        dark_bg_color: "#14532d20",
        border_color: "#22c55e",
        dark_border_color: "#16a34a",
        variant: CalloutVariant::Callout,
    },
    CalloutPreset {
        id: "dosing",
        label: "Dosing Info",
        icon: "pills",
        color: "#0891b2",
        bg_color: "#cffafe",
        dark_bg_color: "#164e6320",
        border_color: "#06b6d4",
        dark_border_color: "#0891b2",
        variant: CalloutVariant::Callout,
    },
    CalloutPreset {
        id: "warning",
        label: "Warning",
        icon: "bell",
        color: "#ea580c",
        bg_color: "#ffedd5",
        dark_bg_color: "#7c2d1220",
        border_color: "#f97316",
        dark_border_color: "#ea580c",
        variant: CalloutVariant::Callout,
    },
];

/// Look up a preset by id
pub fn callout_preset(id: &str) -> Option<&'static CalloutPreset> {
    CALLOUT_PRESETS.iter().find(|preset| preset.id == id)
}

/// `(value, label)` pairs for the editor's preset dropdown
pub fn callout_preset_options() -> Vec<(&'static str, &'static str)> {
    CALLOUT_PRESETS
        .iter()
        .map(|preset| (preset.id, preset.label))
        .collect()
}
