//! Application settings

use std::path::PathBuf;

use framegen_edit::EditorConfig;
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Editor defaults for new sessions
    #[serde(default)]
    pub editor: EditorConfig,
    /// Emit ANSI bold/color hints when printing
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            color: true,
        }
    }
}

impl Settings {
    /// Get the XDG config directory for framegen
    /// Uses $XDG_CONFIG_HOME/framegen on Linux/macOS, falls back to ~/.config/framegen
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("framegen"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("framegen"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|s| Self::from_json(&s))
            .unwrap_or_default()
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framegen_model::ViewMode;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"color": false}"#).unwrap();
        assert!(!settings.color);
        assert_eq!(settings.editor, EditorConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.editor.view_mode = ViewMode::Hex;
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(Settings::from_json("not json"), None);
    }
}
