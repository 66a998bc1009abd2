// ABOUTME: Configuration types and parsing for flotilla.yml.
// ABOUTME: Unit-directory override and per-component checkout locations.

mod init;

pub use init::init_config;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::systemd;

pub const CONFIG_FILENAME: &str = "flotilla.yml";

/// Tool configuration. Every field is optional: a missing file or table
/// falls back to the conventional home-directory layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Override for the systemd unit directory (tests, user units).
    #[serde(default)]
    pub unit_dir: Option<PathBuf>,

    #[serde(default)]
    pub klipper: ComponentConfig,

    #[serde(default)]
    pub moonraker: ComponentConfig,
}

/// Per-component locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentConfig {
    /// The git checkout the service runs from.
    #[serde(default)]
    pub repo: Option<PathBuf>,

    /// Parent directory for per-instance data directories.
    #[serde(default)]
    pub data_root: Option<PathBuf>,
}

impl Config {
    /// Find and parse `flotilla.yml`, walking up from `dir`.
    ///
    /// No file anywhere up the tree is not an error; the defaults apply.
    /// A file that exists but does not parse is.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut current = Some(dir);
        while let Some(d) = current {
            let candidate = d.join(CONFIG_FILENAME);
            if candidate.is_file() {
                let content = fs::read_to_string(&candidate)?;
                return Self::from_yaml(&content);
            }
            current = d.parent();
        }
        Ok(Self::default())
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The unit directory to scan: the configured override or the
    /// platform default.
    pub fn unit_dir_or_default(&self) -> PathBuf {
        self.unit_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(systemd::UNIT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_platform_unit_dir() {
        let config = Config::default();
        assert_eq!(
            config.unit_dir_or_default(),
            PathBuf::from(systemd::UNIT_DIR)
        );
        assert!(config.klipper.repo.is_none());
    }

    #[test]
    fn unit_dir_override_wins() {
        let config = Config::from_yaml("unit_dir: /run/systemd/system\n").unwrap();
        assert_eq!(
            config.unit_dir_or_default(),
            PathBuf::from("/run/systemd/system")
        );
    }
}
