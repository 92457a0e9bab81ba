//! Runtime configuration loaded from a TOML file.
//!
//! All keys are optional:
//!
//! ```toml
//! working_directory = "/tmp"   # directory to scan when no CLI argument
//! max_size = 1920              # longest side in pixels
//! quality = 97                 # JPEG re-encoding quality (1-100)
//! ```
//!
//! Loading is deliberately lenient at the key level: a missing file and a
//! missing or wrong-typed key both fall back to the default for that key,
//! so a config file only needs the values it wants to change and a stray
//! typo in a value's type never aborts a batch. Structurally invalid TOML
//! is still a hard error, since that means the file is not what the user
//! thinks it is.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub const DEFAULT_WORKING_DIRECTORY: &str = "/tmp";
pub const DEFAULT_MAX_SIZE: u32 = 1920;
pub const DEFAULT_QUALITY: u32 = 97;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory scanned when the CLI does not name one.
    pub working_directory: String,
    /// Maximum pixel size of the longest image side.
    pub max_size: u32,
    /// JPEG re-encoding quality.
    pub quality: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_directory: DEFAULT_WORKING_DIRECTORY.to_string(),
            max_size: DEFAULT_MAX_SIZE,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults per key.
    ///
    /// A nonexistent file yields the full default config. See the module
    /// docs for the leniency rules.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let value: toml::Value = toml::from_str(&content)?;
        Ok(Self::from_value(&value))
    }

    /// Extract known keys from a parsed TOML document, defaulting each key
    /// that is absent or has the wrong type.
    fn from_value(value: &toml::Value) -> Self {
        let defaults = Self::default();
        Self {
            working_directory: value
                .get("working_directory")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(defaults.working_directory),
            max_size: extract_positive(value, "max_size").unwrap_or(defaults.max_size),
            quality: extract_positive(value, "quality").unwrap_or(defaults.quality),
        }
    }
}

/// Read a key as a positive u32. Absent, non-integer, zero, negative, and
/// out-of-range values all yield `None`.
fn extract_positive(value: &toml::Value, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(|v| v.as_integer())
        .filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok())
}
