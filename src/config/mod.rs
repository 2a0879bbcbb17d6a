//! Persistent preferences: where data lives, defaults for analytics requests and log level.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::{errors::FinanceError, services::DEFAULT_CLOSEST_GOALS};
use crate::domain::PeriodToken;
use crate::utils::{paths, DEFAULT_LOG_LEVEL};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Overrides the record directory; defaults to `<base>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub default_period: PeriodToken,
    #[serde(default = "default_closest_goals")]
    pub closest_goals: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_period: PeriodToken::default(),
            closest_goals: DEFAULT_CLOSEST_GOALS,
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl Config {
    /// Directory handed to the record store.
    pub fn data_root(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| paths::data_dir_in(base))
    }
}

fn default_closest_goals() -> usize {
    DEFAULT_CLOSEST_GOALS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.into()
}

/// Loads and saves [`Config`] under a base directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `FINANCE_CORE_HOME` or `~/.finance_core`.
    pub fn new() -> Result<Self, FinanceError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, FinanceError> {
        fs::create_dir_all(paths::config_dir_in(&base)).map_err(config_error)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    /// Reads the configuration; a missing file yields defaults.
    pub fn load(&self) -> Result<Config, FinanceError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path).map_err(config_error)?;
            serde_json::from_str(&data).map_err(config_error)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), FinanceError> {
        if config.closest_goals == 0 {
            return Err(FinanceError::Config(
                "closest_goals must be at least 1".into(),
            ));
        }
        let json = serde_json::to_string_pretty(config).map_err(config_error)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path).map_err(config_error)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn config_error(err: impl std::fmt::Display) -> FinanceError {
    FinanceError::Config(err.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), FinanceError> {
    let mut file = File::create(path).map_err(config_error)?;
    file.write_all(data.as_bytes()).map_err(config_error)?;
    file.flush().map_err(config_error)?;
    Ok(())
}
