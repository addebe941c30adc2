//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nextjob/nextjob.toml`
//! 3. Environment variables: `NEXTJOB_*` prefix
//!
//! Column widths and other pixel concerns belong to the view, not here.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, BoardOptions};
use crate::model::FlattenOptions;

const ENV_PREFIX: &str = "NEXTJOB";

/// Unified configuration for nextjob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON record store (default: `<data dir>/nextjob/db.json`)
    pub db_path: PathBuf,
    /// Visible column labels of the company tree
    pub headers: Vec<String>,
    /// Show interviewer role labels next to their names
    pub interviewer_roles: bool,
    /// Show interviewers as rows under their interview
    pub person_rows: bool,
    /// Order companies and roles by most recent application
    pub sort_recent_first: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            headers: vec![
                "Title".into(),
                "Details".into(),
                "Recruiter(s)/Interviewer(s)".into(),
            ],
            interviewer_roles: false,
            person_rows: false,
            sort_recent_first: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub db_path: Option<PathBuf>,
    pub headers: Option<Vec<String>>,
    pub interviewer_roles: Option<bool>,
    pub person_rows: Option<bool>,
    pub sort_recent_first: Option<bool>,
}

fn default_db_path() -> PathBuf {
    ProjectDirs::from("", "", "nextjob")
        .map(|dirs| dirs.data_dir().join("db.json"))
        .unwrap_or_else(|| PathBuf::from("db.json"))
}

/// Get the XDG config directory for nextjob.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nextjob").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nextjob.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path; unexpandable input is kept.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Load settings from defaults, the global config file and `NEXTJOB_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` as the global config, if it exists.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(
        config_file: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file overrides what it specifies
        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        current.db_path = expand_path(&current.db_path);
        Ok(current)
    }

    /// Overlay scalar and list values that `overlay` specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            db_path: overlay.db_path.clone().unwrap_or_else(|| self.db_path.clone()),
            headers: overlay.headers.clone().unwrap_or_else(|| self.headers.clone()),
            interviewer_roles: overlay.interviewer_roles.unwrap_or(self.interviewer_roles),
            person_rows: overlay.person_rows.unwrap_or(self.person_rows),
            sort_recent_first: overlay.sort_recent_first.unwrap_or(self.sort_recent_first),
        }
    }

    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("headers"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("db_path") {
            settings.db_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<Vec<String>>("headers") {
            settings.headers = val;
        }
        if let Ok(val) = config.get_bool("interviewer_roles") {
            settings.interviewer_roles = val;
        }
        if let Ok(val) = config.get_bool("person_rows") {
            settings.person_rows = val;
        }
        if let Ok(val) = config.get_bool("sort_recent_first") {
            settings.sort_recent_first = val;
        }
        Ok(settings)
    }

    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            flatten: FlattenOptions {
                interviewer_roles: self.interviewer_roles,
                person_rows: self.person_rows,
            },
            sort_recent_first: self.sort_recent_first,
        }
    }

    /// Settings as TOML, as written in a config file.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
