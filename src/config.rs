//! Configuration loading.
//!
//! The config lives at `<config_dir>/zcalc/config.toml`. A missing file
//! means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::{DEFAULT_FRACTION_DIGITS, NumberFormat};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub clipboard: ClipboardConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum fractional digits shown for non-integral results.
    pub fraction_digits: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy the final display content when the session ends.
    pub copy_on_exit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or the default location if `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// The number format described by `[display]`.
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(self.display.fraction_digits)
    }
}

/// `<config_dir>/zcalc/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::MAX_FRACTION_DIGITS;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.fraction_digits, 10);
        assert!(!config.clipboard.copy_on_exit);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
[display]
fraction_digits = 4

[log]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.display.fraction_digits, 4);
        assert_eq!(config.log.level, "debug");
        assert!(!config.clipboard.copy_on_exit);
        assert_eq!(config.number_format(), NumberFormat::new(4));
    }

    #[test]
    fn test_fraction_digits_clamped() {
        let config = Config::parse("[display]\nfraction_digits = 40\n").unwrap();
        assert_eq!(config.number_format().fraction_digits, MAX_FRACTION_DIGITS);
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[clipboard]\ncopy_on_exit = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.clipboard.copy_on_exit);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nfraction_digits = \"ten\"\n").unwrap();

        let err = Config::load_or_default(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
