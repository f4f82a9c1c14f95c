use serde::Serialize;

/// Lightweight model substituted when the requested one cannot be loaded.
pub const FALLBACK_MODEL: &str = "t5-small";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub model_id: &'static str,
}

pub const PRESETS: [ModelPreset; 3] = [
    ModelPreset {
        key: "distilbart",
        label: "DistilBART (Recommended)",
        model_id: "sshleifer/distilbart-cnn-12-6",
    },
    ModelPreset {
        key: "t5-small",
        label: "T5-Small (Fast)",
        model_id: "t5-small",
    },
    ModelPreset {
        key: "bart-large",
        label: "BART-Large (High Quality)",
        model_id: "facebook/bart-large-cnn",
    },
];

pub fn default_preset() -> &'static ModelPreset {
    &PRESETS[0]
}

/// Looks a preset up by key or display label, ignoring case.
pub fn find_preset(name: &str) -> Option<&'static ModelPreset> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(name) || p.label.eq_ignore_ascii_case(name))
}

/// Maps a preset name to its model id; anything else is taken as a raw id.
pub fn resolve_model(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => default_preset().model_id.to_string(),
        Some(name) => find_preset(name)
            .map(|p| p.model_id.to_string())
            .unwrap_or_else(|| name.to_string()),
    }
}
