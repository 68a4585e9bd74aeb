/// Application configuration
///
/// Loaded from `config.json` in the user's config directory:
/// - Linux: ~/.config/media-slot/config.json
/// - macOS: ~/Library/Application Support/media-slot/config.json
/// - Windows: %APPDATA%\media-slot\config.json
///
/// A missing file means defaults; a malformed one is an error.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::slot::footer::Labels;
use crate::slot::props::{Dimensions, SlotProps};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub first_name: String,
    pub last_name: String,
    /// Access token handed to the upload functions
    pub access_token: String,
    pub slot: SlotProps,
    pub labels: Labels,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            access_token: "local-dev-token".to_string(),
            slot: SlotProps {
                tooltip_text: "Edit profile picture".to_string(),
                modal_title: "Profile picture".to_string(),
                size_config: Some(Dimensions {
                    max_height: Some(80.0),
                    ..Dimensions::default()
                }),
                ..SlotProps::default()
            },
            labels: Labels::default(),
        }
    }
}

impl AppConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("media-slot");
        path.push("config.json");
        Some(path)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SlotError::Config(format!("{}: {}", path.display(), e)));
            }
        };

        Self::from_json(&json)
    }

    /// Load from the default location
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SlotError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SlotError::Config(e.to_string()))
    }

    /// Display name, used as the placeholder seed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::props::{Shape, SizeCategory};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "first_name": "Ada",
                "last_name": "Lovelace",
                "slot": { "size": "lg", "shape": "square", "show_continue": true },
                "labels": { "save": "Upload" }
            }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.full_name(), "Ada Lovelace");
        assert_eq!(config.access_token, "local-dev-token");
        assert_eq!(config.slot.size, SizeCategory::Lg);
        assert_eq!(config.slot.shape, Shape::Square);
        assert!(config.slot.show_continue);
        assert_eq!(config.labels.save, "Upload");
        assert_eq!(config.labels.cancel, "Cancel");
    }

    #[test]
    fn test_default_slot_is_capped_at_80px() {
        let size_config = AppConfig::default().slot.size_config.unwrap();
        assert_eq!(size_config.max_height, Some(80.0));
        assert_eq!(size_config.width, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(SlotError::Config(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_props() {
        let config = AppConfig::default();
        let restored = AppConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let config = AppConfig {
            last_name: String::new(),
            ..AppConfig::default()
        };
        assert_eq!(config.full_name(), "Jane");
    }
}
