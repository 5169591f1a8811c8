//! Global petcare configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::date::DisplayZone;
use crate::error::{PetcareError, PetcareResult};

static DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn is_default_api_url(url: &String) -> bool {
    url == DEFAULT_API_URL
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn is_default_timeout(secs: &u64) -> bool {
    *secs == DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/petcare/config.toml, overridable with
/// `PETCARE_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PetcareConfig {
    #[serde(default = "default_api_url", skip_serializing_if = "is_default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs", skip_serializing_if = "is_default_timeout")]
    pub timeout_secs: u64,

    /// IANA timezone used to read server timestamps. Local time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Pet shown by `petcare calendar` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pet: Option<String>,

    /// Where the session and legacy event files live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for PetcareConfig {
    fn default() -> Self {
        PetcareConfig {
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            timezone: None,
            default_pet: None,
            data_dir: None,
        }
    }
}

impl PetcareConfig {
    pub fn config_path() -> PetcareResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PetcareError::Config("Could not determine config directory".into()))?
            .join("petcare");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> PetcareResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PetcareResult<Self> {
        let config: PetcareConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("PETCARE").try_parsing(true))
            .build()
            .map_err(|e| PetcareError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PetcareError::Config(e.to_string()))?;

        config.base_url()?;
        Ok(config)
    }

    /// Save the current config to ~/.config/petcare/config.toml
    pub fn save(&self) -> PetcareResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> PetcareResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PetcareError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| PetcareError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PetcareResult<()> {
        let contents = format!(
            "\
# petcare configuration

# Address of the petcare server:
# api_url = \"{}\"

# Seconds to wait for the server before giving up:
# timeout_secs = {}

# Timezone used to turn server timestamps into calendar days (default: local):
# timezone = \"Europe/Berlin\"

# Pet shown by `petcare calendar` when --pet is not given:
# default_pet = \"<pet id>\"
",
            DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PetcareError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PetcareError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn base_url(&self) -> PetcareResult<Url> {
        Url::parse(&self.api_url)
            .map_err(|e| PetcareError::Config(format!("Invalid api_url '{}': {e}", self.api_url)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn zone(&self) -> PetcareResult<DisplayZone> {
        DisplayZone::from_name(self.timezone.as_deref())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PetcareResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => dirs::data_dir()
                .map(|d| d.join("petcare"))
                .ok_or_else(|| PetcareError::Config("Could not determine data directory".into())),
        }
    }
}
