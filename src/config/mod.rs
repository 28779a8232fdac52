//! Configuration management module.
//!
//! This module handles loading, saving, and managing application
//! configuration, including the log level and the initial page and chat
//! window a session starts with.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::state::{ActivePage, ChatWindowState};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/netbank";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: LevelFilter,
    pub start_page: ActivePage,
    pub chat_window: ChatWindowState,
    pub guest_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub start_page: ActivePage,
    #[serde(default)]
    pub chat_window: ChatWindowState,
    #[serde(default = "default_guest_name")]
    pub guest_name: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_guest_name() -> String {
    "Guest".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config {
            log_level: LevelFilter::Info,
            start_page: ActivePage::default(),
            chat_window: ChatWindowState::default(),
            guest_name: default_guest_name(),
            file_path: None,
        }
    }

    /// Load an existing configuration from the default directory or the
    /// custom one if provided. A missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                source: e,
            })?;
            let data: FileSpec =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::InvalidFile {
                    path: file_path.clone(),
                    source: e,
                })?;
            let log_level = LevelFilter::from_str(&data.log_level).map_err(|_| {
                ConfigError::InvalidLogLevel {
                    path: file_path.clone(),
                    value: data.log_level.clone(),
                }
            })?;
            if data.guest_name.trim().is_empty() {
                return Err(ConfigError::BlankGuestName {
                    path: file_path.clone(),
                }
                .into());
            }
            self.log_level = log_level;
            self.start_page = data.start_page;
            self.chat_window = data.chat_window;
            self.guest_name = data.guest_name;
        }

        Ok(())
    }

    /// Serialize the configuration and write it to disk, creating the
    /// directory if needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            log_level: self.log_level.to_string().to_lowercase(),
            start_page: self.start_page,
            chat_window: self.chat_window,
            guest_name: self.guest_name.clone(),
        };
        let content = serde_yaml::to_string(&data).map_err(ConfigError::SerializationFailed)?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
