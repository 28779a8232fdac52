//! Errors raised while reading or writing `config.yml`.

use std::io;
use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save()` was called before `load()` picked a directory
    #[error("No config.yml location chosen yet; load a configuration directory before saving")]
    FilePathNotSet,

    /// `~/.config/netbank` could not be resolved
    #[error("Cannot resolve ~/.config/netbank: home directory not found")]
    HomeDirectoryNotFound,

    #[error("Cannot read settings from {path}: {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid YAML, or `start_page`/`chat_window` hold an
    /// unknown value
    #[error("Invalid settings in {path}: {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Accepted values are the `log` level names plus `off`
    #[error("Unknown log_level '{value}' in {path}")]
    InvalidLogLevel { path: PathBuf, value: String },

    /// Chat drafts sent while logged out need a sender name
    #[error("guest_name in {path} is blank")]
    BlankGuestName { path: PathBuf },

    #[error("Cannot write settings to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create settings directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot encode settings as YAML: {0}")]
    SerializationFailed(#[source] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn messages_name_the_settings_file() {
        let path = PathBuf::from("/home/jane/.config/netbank/config.yml");

        let error = ConfigError::InvalidLogLevel {
            path: path.clone(),
            value: "loud".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'loud'"));
        assert!(message.contains("netbank/config.yml"));

        let error = ConfigError::BlankGuestName { path };
        assert!(error.to_string().starts_with("guest_name in /home/jane"));

        let error = ConfigError::HomeDirectoryNotFound;
        assert!(error.to_string().contains("~/.config/netbank"));
    }

    #[test]
    fn io_failures_keep_their_source() {
        let error = ConfigError::LoadFailed {
            path: PathBuf::from("/etc/netbank/config.yml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(error.to_string().contains("/etc/netbank/config.yml"));
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "permission denied");
    }

    #[test]
    fn unknown_start_page_is_an_invalid_file() {
        let source = serde_yaml::from_str::<crate::state::ActivePage>("transfers").unwrap_err();
        let error = ConfigError::InvalidFile {
            path: PathBuf::from("config.yml"),
            source,
        };
        let message = error.to_string();
        assert!(message.starts_with("Invalid settings in config.yml"));
        assert!(error.source().is_some());
    }
}
