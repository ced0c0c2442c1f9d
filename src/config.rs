//! Persisted settings for tabterm.
//!
//! Settings live in `~/.tabterm/settings.toml` and are read once at
//! startup. The key names mirror the settings schema of the desktop
//! environment the terminal is shipped for:
//!
//! ```toml
//! # Current font as a single "<family> <size>" string
//! font-family = "monospace 10"
//!
//! # Initial window geometry in pixels
//! window-width = 800
//! window-height = 600
//!
//! # Window opacity, 0.0 (transparent) to 1.0 (opaque)
//! opacity = 0.85
//!
//! # Shell used for new tabs and as the exec fallback (optional)
//! shell = "/bin/bash"
//! ```
//!
//! A missing or corrupt file degrades to defaults; the file is written
//! back only when a preferences transaction commits.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::spawn::DEFAULT_SHELL;

const DEFAULT_FONT: &str = "monospace 10";
const DEFAULT_WIDTH: i32 = 800;
const DEFAULT_HEIGHT: i32 = 600;
const DEFAULT_OPACITY: f64 = 0.85;

/// Persisted application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Current font as a combined "<family> <size>" string
    #[serde(rename = "font-family")]
    pub font_family: String,
    /// Initial window width in pixels
    #[serde(rename = "window-width")]
    pub window_width: i32,
    /// Initial window height in pixels
    #[serde(rename = "window-height")]
    pub window_height: i32,
    /// Window opacity in [0, 1]
    pub opacity: f64,
    /// Shell command for new tabs (defaults to /bin/bash)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT.to_string(),
            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,
            opacity: DEFAULT_OPACITY,
            shell: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                match toml::from_str::<Settings>(&content) {
                    Ok(settings) => return settings.normalized(),
                    Err(e) => warn!("Ignoring corrupt settings file: {}", e),
                }
            }
        }
        Self::default()
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<(), String> {
        match Self::default_path() {
            Some(path) => self.save_to(&path),
            None => Err("Could not determine settings path".to_string()),
        }
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(path, content).map_err(|e| format!("Failed to write settings: {}", e))
    }

    /// The shell to run in new tabs.
    pub fn shell(&self) -> &str {
        self.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }

    /// Coerce out-of-range values back to defaults.
    fn normalized(mut self) -> Self {
        if self.window_width <= 0 {
            warn!(
                "Invalid window-width {}, using {}",
                self.window_width, DEFAULT_WIDTH
            );
            self.window_width = DEFAULT_WIDTH;
        }
        if self.window_height <= 0 {
            warn!(
                "Invalid window-height {}, using {}",
                self.window_height, DEFAULT_HEIGHT
            );
            self.window_height = DEFAULT_HEIGHT;
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            warn!("Invalid opacity {}, using {}", self.opacity, DEFAULT_OPACITY);
            self.opacity = DEFAULT_OPACITY;
        }
        self
    }

    /// Default settings file path, creating the directory on first use.
    pub fn default_path() -> Option<PathBuf> {
        let home = home_dir()?;
        let dir = home.join(".tabterm");
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        Some(dir.join("settings.toml"))
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.font_family, "monospace 10");
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.window_height, 600);
        assert_eq!(settings.opacity, 0.85);
        assert_eq!(settings.shell(), "/bin/bash");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml"));
        assert_eq!(settings.window_width, 800);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not toml [[").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.font_family, "monospace 10");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.font_family = "Fira Code 11".to_string();
        settings.window_width = 1024;
        settings.opacity = 0.5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.font_family, "Fira Code 11");
        assert_eq!(loaded.window_width, 1024);
        assert_eq!(loaded.opacity, 0.5);
    }

    #[test]
    fn test_serialized_key_names() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(text.contains("font-family"));
        assert!(text.contains("window-width"));
        assert!(text.contains("window-height"));
        assert!(text.contains("opacity"));
    }

    #[test]
    fn test_invalid_values_coerced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "window-width = -50\nwindow-height = 0\nopacity = 3.5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.window_height, 600);
        assert_eq!(settings.opacity, 0.85);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "window-width = 1280\n").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.window_width, 1280);
        assert_eq!(settings.window_height, 600);
        assert_eq!(settings.font_family, "monospace 10");
    }
}
