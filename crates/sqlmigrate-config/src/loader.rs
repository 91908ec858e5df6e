use std::path::{Path, PathBuf};

use sqlmigrate_common::{Error, Result};
use tracing::debug;

use crate::model::MigrateConfig;

/// File names probed, in order, inside the default config directory.
const CANDIDATES: &[&str] = &["config.toml", "config.yml", "config.yaml"];

/// Resolves and parses the optional sqlmigrate config file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `explicit` if given, otherwise from the first
    /// config file found in the default directory, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<MigrateConfig> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_config_dir().and_then(|dir| Self::discover_in(&dir)) {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(MigrateConfig::default())
            }
        }
    }

    /// Parse a single config file. The format is chosen by extension.
    pub fn load_from(path: &Path) -> Result<MigrateConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config = match ext {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("YAML parse error in {}: {e}", path.display()))
            })?,
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("TOML parse error in {}: {e}", path.display()))
            })?,
            other => {
                return Err(Error::Config(format!(
                    "unsupported config extension: {other}"
                )));
            }
        };

        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// `~/.config/sqlmigrate` on Linux, the platform equivalent elsewhere.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sqlmigrate"))
    }

    /// First existing candidate config file inside `dir`.
    pub fn discover_in(dir: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }
}
