//! Settings for the terminal front-ends.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CalcError, Result};

pub type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub integer: Rgb,
    pub fraction: Rgb,
    pub separator: Rgb,
    pub sign: Rgb,
    pub special: Rgb,
    pub expression: Rgb,
    pub operator: Rgb,
    pub carat: Rgb,
    pub error: Rgb,
    pub message: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            integer: (0xF0, 0xF0, 0xF0),    // Near white
            fraction: (0xB4, 0xB4, 0xB4),   // Light gray
            separator: (0xFF, 0xFF, 0xFF),  // White
            sign: (0xFF, 0xFF, 0xFF),       // White
            special: (0xC8, 0x64, 0xC8),    // Bright purple
            expression: (0x8C, 0x8C, 0x8C), // Mid gray
            operator: (0xD9, 0x3B, 0x3F),   // Accent red
            carat: (0xFF, 0x14, 0x00),      // Bright red
            error: (0xDC, 0x64, 0x5A),      // Soft red
            message: (0x78, 0xB4, 0x78),    // Soft green
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prompt: String,
    /// Start in raw keypad mode instead of line mode.
    pub keypad: bool,
    pub colours: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            keypad: false,
            colours: Palette::default(),
        }
    }
}

/// `$DESKCALC_CONFIG`, else `deskcalc/config.toml` under the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("DESKCALC_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("deskcalc").join("config.toml"))
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicit `path` must exist; the default location may be absent.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => read_settings(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_settings(&path)?,
            _ => Settings::default(),
        },
    };

    if let Ok(prompt) = env::var("DESKCALC_PROMPT") {
        settings.prompt = prompt;
    }

    Ok(settings)
}

fn read_settings(path: &Path) -> Result<Settings> {
    debug!(path = %path.display(), "reading settings");
    let raw = fs::read_to_string(path).map_err(|source| CalcError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&raw).map_err(|source| CalcError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_settings(raw: &str) -> std::result::Result<Settings, toml::de::Error> {
    toml::from_str(raw)
}
