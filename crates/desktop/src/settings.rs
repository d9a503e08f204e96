use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use camscope_core::shared::constants::{DEFAULT_THRESHOLD, DEFAULT_TICK_INTERVAL_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    System,
    Dark,
    Light,
}

impl Appearance {
    pub const ALL: &[Appearance] = &[Appearance::System, Appearance::Dark, Appearance::Light];
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::System => write!(f, "System"),
            Appearance::Dark => write!(f, "Dark"),
            Appearance::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device_id: i32,
    pub tick_interval_ms: u64,
    pub threshold: u8,
    pub appearance: Appearance,
    pub high_contrast: bool,
    pub font_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_id: 0,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            threshold: DEFAULT_THRESHOLD,
            appearance: Appearance::System,
            high_contrast: false,
            font_scale: 1.0,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("CamScope").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = fs::write(path, json);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.device_id, 0);
        assert_eq!(settings.tick_interval_ms, 30);
        assert_eq!(settings.threshold, 127);
        assert_eq!(settings.appearance, Appearance::System);
        assert!(!settings.high_contrast);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.device_id = 2;
        settings.threshold = 200;
        settings.appearance = Appearance::Dark;

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.device_id, 2);
        assert_eq!(back.threshold, 200);
        assert_eq!(back.appearance, Appearance::Dark);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let back: Settings = serde_json::from_str(r#"{"device_id": 1}"#).unwrap();
        assert_eq!(back.device_id, 1);
        assert_eq!(back.threshold, 127);
        assert_eq!(back.appearance, Appearance::System);
    }
}
