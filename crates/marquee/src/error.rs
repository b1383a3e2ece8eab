//! Error types for the Marquee shell.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by view-controller operations.
#[derive(Debug, Error)]
pub enum ShellError {
    /// An operation was called in a state that does not allow it.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A system name did not resolve.
    #[error("Unknown system: {0}")]
    UnknownSystem(String),

    /// The external launcher failed.
    #[error("Launch failed for {game}: {reason}")]
    LaunchFailed {
        /// Game path
        game: PathBuf,
        /// What went wrong
        reason: String,
    },
}

impl ShellError {
    /// Build a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

/// Errors loading settings or the system catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Well-formed but unusable value.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting or field name
        key: String,
        /// Offending value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_message() {
        let err = ShellError::precondition("not viewing a game list");
        assert_eq!(
            err.to_string(),
            "Precondition failed: not viewing a game list"
        );
    }

    #[test]
    fn test_launch_failed_message() {
        let err = ShellError::LaunchFailed {
            game: PathBuf::from("/roms/nes/zelda.nes"),
            reason: "exit status 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("zelda.nes"));
        assert!(msg.contains("exit status 1"));
    }

    #[test]
    fn test_config_error_io_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::from(io_err);
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_config_error_parse_from() {
        let parse_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let err = ConfigError::from(parse_err);
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::InvalidValue {
            key: "TransitionStyle".to_string(),
            value: "wipe".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for TransitionStyle: wipe");
    }
}
