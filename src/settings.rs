//! Application settings (settings.toml)
//!
//! Every key is optional; a missing file means "all defaults".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::NoteError;
use crate::style::PaletteOverrides;
use crate::variant::Variant;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Lowest window alpha accepted; anything fainter is unreadable
pub const MIN_OPACITY: f32 = 0.2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Chrome flavour; defaults to the build target's
    #[serde(default)]
    pub variant: Variant,

    /// Text font; defaults per variant
    #[serde(default)]
    pub font_family: Option<String>,

    /// Text size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Window alpha (0.2 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Where note_config.json and the log live
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Write selfnote.log
    #[serde(default = "default_true")]
    pub logging: bool,

    #[serde(default)]
    pub palette: PaletteOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            font_family: None,
            font_size: default_font_size(),
            opacity: default_opacity(),
            data_dir: None,
            logging: true,
            palette: PaletteOverrides::default(),
        }
    }
}

fn default_font_size() -> f32 {
    12.0
}

fn default_opacity() -> f32 {
    0.97
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Find settings.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("selfnote").join(SETTINGS_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(SETTINGS_FILE_NAME))),
            Some(PathBuf::from(SETTINGS_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, NoteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, NoteError> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings.normalized())
    }

    /// Clamp out-of-range values
    fn normalized(mut self) -> Self {
        if !self.opacity.is_finite() {
            self.opacity = default_opacity();
        }
        self.opacity = self.opacity.clamp(MIN_OPACITY, 1.0);
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            self.font_size = default_font_size();
        }
        self
    }

    /// Font family to use, honouring the variant default
    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .unwrap_or_else(|| self.variant.default_font_family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.font_size, 12.0);
        assert!(settings.logging);
        assert_eq!(settings.font_family(), Variant::native().default_font_family());
    }

    #[test]
    fn test_overrides() {
        let toml = r##"
            variant = "macos"
            font_size = 14.0
            opacity = 0.9
            data_dir = "/tmp/notes"
            logging = false

            [palette]
            background = "#FFEEDD"
        "##;
        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(settings.variant, Variant::MacOs);
        assert_eq!(settings.font_family(), "Helvetica Neue");
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.opacity, 0.9);
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/notes")));
        assert!(!settings.logging);
        assert_eq!(settings.palette.background.as_deref(), Some("#FFEEDD"));
    }

    #[test]
    fn test_explicit_font_wins() {
        let settings = Settings::from_toml_str("font_family = \"Consolas\"").unwrap();
        assert_eq!(settings.font_family(), "Consolas");
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings = Settings::from_toml_str("opacity = 0.0\nfont_size = -3.0").unwrap();
        assert_eq!(settings.opacity, MIN_OPACITY);
        assert_eq!(settings.font_size, 12.0);

        let settings = Settings::from_toml_str("opacity = 5.0").unwrap();
        assert_eq!(settings.opacity, 1.0);
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(matches!(
            Settings::from_toml_str("opacity = \"very\""),
            Err(NoteError::Settings(_))
        ));
        assert!(Settings::from_toml_str("variant = \"linux\"").is_err());
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let result = Settings::load_from_path(Path::new("/definitely/not/here/settings.toml"));
        assert!(matches!(result, Err(NoteError::Io(_))));
    }

    #[test]
    fn test_shipped_settings_parse_to_defaults() {
        let shipped = include_str!("../assets/settings.toml");
        let settings = Settings::from_toml_str(shipped).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
