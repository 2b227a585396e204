use std::path::PathBuf;

use cadence::Configuration;
use clap::ValueEnum;
use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "CADENCE_";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for the terminal
    #[default]
    Human,
    /// The full results payload as JSON
    Json,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub analytics: Configuration,
    pub format: OutputFormat,
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

impl Settings {
    /// Defaults, then `settings.toml` from the config directory, then `CADENCE_*` variables
    ///
    /// Nested keys use a double underscore, e.g. `CADENCE_ANALYTICS__PAUSE_THRESHOLD_MS`.
    pub fn load(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut settings = Figment::from(Serialized::defaults(Self::default()));

        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Cadence", "Cadence")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join(SETTINGS_FILE);
        if settings_toml.exists() {
            log::debug!("Loading settings from {}", settings_toml.display());
            settings = settings.merge(Toml::file(settings_toml));
        }

        settings = settings.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(settings.extract().map_err(Box::new)?)
    }
}
