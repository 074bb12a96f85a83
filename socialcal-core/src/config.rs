//! Global socialcal configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{SocialCalError, SocialCalResult};

static DEFAULT_DATA_DIR: &str = "~/.socialcal";
static DEFAULT_PROVIDER: &str = "local";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// Configuration at ~/.config/socialcal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SocialcalConfig {
    /// Where the local provider keeps birthdays.json
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// "local", or the name of an external `socialcal-provider-<name>` binary
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Passed through verbatim to external providers (e.g. project URL, table).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_params: HashMap<String, toml::Value>,
}

impl Default for SocialcalConfig {
    fn default() -> Self {
        SocialcalConfig {
            data_dir: default_data_dir(),
            provider: default_provider(),
            provider_params: HashMap::new(),
        }
    }
}

impl SocialcalConfig {
    pub fn config_path() -> SocialCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SocialCalError::Config("Could not determine config directory".into()))?
            .join("socialcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented-out default first if none exists.
    pub fn load() -> SocialCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> SocialCalResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| SocialCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SocialCalError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Provider parameters as a JSON object for the provider protocol.
    pub fn provider_params_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.provider_params
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }

    pub fn save_to(&self, path: &Path) -> SocialCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SocialCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| SocialCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SocialCalResult<()> {
        let contents = format!(
            "\
# socialcal configuration

# Where the local provider stores birthdays.json:
# data_dir = \"{}\"

# Which provider to sync with. \"local\" keeps everything on this machine;
# any other name runs the socialcal-provider-<name> binary from PATH:
# provider = \"{}\"

# Extra settings handed to an external provider:
# [provider_params]
# table = \"birthdays\"
",
            DEFAULT_DATA_DIR, DEFAULT_PROVIDER
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SocialCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SocialCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
