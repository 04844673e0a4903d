use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "config.yaml";

/// Application directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "DisplayDeck";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSettings {
    /// Where profiles.json and applied_profile.json live. Never read from the file.
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Explicit displayplacer location. Default: bundled sibling, then PATH.
    #[serde(default)]
    pub placer_path: Option<PathBuf>,
    /// Preview canvas width. Default: 320.
    #[serde(default = "default_preview_width")]
    pub preview_width: u32,
    /// Preview canvas height. Default: 200.
    #[serde(default = "default_preview_height")]
    pub preview_height: u32,
    /// How long an apply counts as in progress. Default: 1500.
    #[serde(default = "default_apply_settle_ms")]
    pub apply_settle_ms: u64,
}

fn default_preview_width() -> u32 {
    320
}

fn default_preview_height() -> u32 {
    200
}

fn default_apply_settle_ms() -> u64 {
    1500
}

impl Default for DeckSettings {
    fn default() -> Self {
        DeckSettings {
            data_dir: PathBuf::new(),
            placer_path: None,
            preview_width: default_preview_width(),
            preview_height: default_preview_height(),
            apply_settle_ms: default_apply_settle_ms(),
        }
    }
}

impl DeckSettings {
    /// Load `config.yaml` from `data_dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(data_dir: &Path) -> Result<DeckSettings, ConfigError> {
        let path = data_dir.join(SETTINGS_FILE);
        let mut settings = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => DeckSettings::default(),
            Ok(text) => serde_yaml::from_str::<DeckSettings>(&text)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DeckSettings::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        settings.data_dir = data_dir.to_path_buf();
        Ok(settings)
    }
}

/// Platform data directory for DisplayDeck, e.g.
/// `~/Library/Application Support/DisplayDeck` on macOS.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR_NAME);
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    home.join(".local").join("share").join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = DeckSettings::load(dir.path()).unwrap();
        assert_eq!(s.data_dir, dir.path());
        assert_eq!(s.preview_width, 320);
        assert_eq!(s.preview_height, 200);
        assert_eq!(s.apply_settle_ms, 1500);
        assert!(s.placer_path.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "placer_path: /usr/local/bin/displayplacer\napply_settle_ms: 3000\n",
        )
        .unwrap();
        let s = DeckSettings::load(dir.path()).unwrap();
        assert_eq!(s.placer_path, Some(PathBuf::from("/usr/local/bin/displayplacer")));
        assert_eq!(s.apply_settle_ms, 3000);
        assert_eq!(s.preview_width, 320);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "preview_width: [wide]\n").unwrap();
        let err = DeckSettings::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        assert!(default_data_dir().ends_with(APP_DIR_NAME));
    }
}
