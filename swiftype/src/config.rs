use std::path::{Path, PathBuf};

use cadence::Configuration;
use cadence::history::DEFAULT_GOAL_WPM;
use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the environment variables that override `settings.toml`
pub const ENV_PREFIX: &str = "SWIFTYPE_";

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Language used when no preference has been stored yet
    pub language: String,
    /// Log filter used when neither `SWIFTYPE_LOG` nor `-v` is given
    pub log_level: String,
    /// Where results are stored. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Number of results shown by `history`
    pub history_limit: usize,
    /// Average speed `stats` measures progress against
    pub goal_wpm: u32,
    pub session: Configuration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            log_level: "warn".to_string(),
            data_dir: None,
            history_limit: 7,
            goal_wpm: DEFAULT_GOAL_WPM,
            session: Configuration::default(),
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
    /// Resolved storage directory
    pub data_dir: PathBuf,
}

impl Config {
    /// Load the configuration, from `override_path` if given
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("com", "SwifType", "SwifType");

        // Check for toml file location
        let config_dir = override_path
            .clone()
            .or_else(|| dirs.as_ref().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoDirectory)?;

        // An explicit config directory keeps its data next to it
        let default_data_dir = match (&override_path, &dirs) {
            (None, Some(dirs)) => dirs.data_dir().to_path_buf(),
            _ => config_dir.join("data"),
        };

        Self::load(config_dir, default_data_dir)
    }

    /// Load from an explicit directory, layering defaults, `settings.toml` and the environment
    pub fn load(config_dir: PathBuf, default_data_dir: PathBuf) -> Result<Self, ConfigError> {
        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings: Settings = figment(&config_dir).extract().map_err(Box::new)?;

        let data_dir = settings.data_dir.clone().unwrap_or(default_data_dir);

        Ok(Self {
            settings,
            config_dir,
            data_dir,
        })
    }
}

fn figment(config_dir: &Path) -> Figment {
    // Grab default configuration
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    let settings_toml = config_dir.join(SETTINGS_FILE);
    if settings_toml.exists() {
        figment = figment.merge(Toml::file(settings_toml));
    }

    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");
        let config = Config::load(config_dir.clone(), dir.path().join("data")).unwrap();

        assert!(config_dir.exists());
        assert_eq!(config.settings.language, "en");
        assert_eq!(config.settings.history_limit, 7);
        assert_eq!(config.settings.goal_wpm, 50);
        assert_eq!(config.settings.session.min_finish_chars, 50);
        assert_eq!(config.data_dir, dir.path().join("data"));
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"
language = "fr"
history_limit = 3
goal_wpm = 65
data_dir = "/tmp/swiftype-results"

[session]
min_finish_chars = 10
"#,
        )
        .unwrap();

        let config = Config::load(dir.path().to_path_buf(), dir.path().join("data")).unwrap();
        assert_eq!(config.settings.language, "fr");
        assert_eq!(config.settings.history_limit, 3);
        assert_eq!(config.settings.goal_wpm, 65);
        assert_eq!(config.settings.log_level, "warn");
        assert_eq!(config.settings.session.min_finish_chars, 10);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/swiftype-results"));
    }

    #[test]
    fn test_invalid_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "history_limit = \"many\"").unwrap();

        let result = Config::load(dir.path().to_path_buf(), dir.path().join("data"));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
