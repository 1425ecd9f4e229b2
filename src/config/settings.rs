//! Application settings and paths.
//!
//! Manages XDG-compliant paths for configuration and data.

use crate::encoder::{EncodeOptions, MAX_MARGIN, WIDTH_RANGE};
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// Global paths singleton.
static PATHS: OnceLock<Paths> = OnceLock::new();

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/justqr)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/justqr)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Get the global paths instance, creating the directories on first use.
    pub fn get() -> ConfigResult<&'static Paths> {
        if let Some(paths) = PATHS.get() {
            return Ok(paths);
        }
        let paths = Self::new()?;
        Ok(PATHS.get_or_init(|| paths))
    }

    /// Initialize paths using XDG directories.
    fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "justqr", "justqr").ok_or(ConfigError::DirectoryNotFound)?;

        let paths = Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        };

        // Ensure directories exist
        fs::create_dir_all(&paths.config_dir)?;
        fs::create_dir_all(&paths.data_dir)?;

        Ok(paths)
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Target QR image width in pixels.
    pub qr_width: u32,
    /// Quiet zone around the code, in modules.
    pub qr_margin: u32,
    /// Dark module color as `#RRGGBB`.
    pub dark_color: String,
    /// Light module color as `#RRGGBB`.
    pub light_color: String,
    /// Request timeout for the remote backend in seconds, 0 for none.
    pub remote_timeout_secs: u64,
    /// Override for the local record storage directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let options = EncodeOptions::default();
        Self {
            qr_width: options.width,
            qr_margin: options.margin,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
            remote_timeout_secs: 10,
            data_dir: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::get()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Save settings to a specific file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Build encoder options, validating the configured size and colors.
    pub fn encode_options(&self) -> ConfigResult<EncodeOptions> {
        if !WIDTH_RANGE.contains(&self.qr_width) {
            return Err(ConfigError::OutOfRange {
                field: "qr_width",
                value: self.qr_width,
                min: *WIDTH_RANGE.start(),
                max: *WIDTH_RANGE.end(),
            });
        }
        if self.qr_margin > MAX_MARGIN {
            return Err(ConfigError::OutOfRange {
                field: "qr_margin",
                value: self.qr_margin,
                min: 0,
                max: MAX_MARGIN,
            });
        }

        Ok(EncodeOptions {
            width: self.qr_width,
            margin: self.qr_margin,
            dark: parse_hex_color(&self.dark_color)?,
            light: parse_hex_color(&self.light_color)?,
        })
    }

    /// Remote request timeout, `None` when disabled.
    pub fn remote_timeout(&self) -> Option<Duration> {
        (self.remote_timeout_secs > 0).then(|| Duration::from_secs(self.remote_timeout_secs))
    }
}

/// Parse a `#RRGGBB` color.
fn parse_hex_color(s: &str) -> ConfigResult<[u8; 3]> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ConfigError::InvalidColor(s.to_string()));
    }

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
    }
    Ok(rgb)
}
