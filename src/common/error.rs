use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::remote_address::RemoteAddressError;
use crate::infrastructure::process::command_runner::CommandRunnerError;

#[derive(Error, Debug)]
pub enum RemotesError {
    #[error("Invalid remote address: {source}")]
    Address {
        #[from]
        source: RemoteAddressError,
    },

    #[error("Command execution failed: {message}")]
    CommandError {
        message: String,
        #[source]
        source: Option<CommandRunnerError>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Remote not found: {name}")]
    RemoteNotFound { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl RemotesError {
    pub fn command_error_with_source(message: impl Into<String>, source: CommandRunnerError) -> Self {
        Self::CommandError {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn remote_not_found(name: impl Into<String>) -> Self {
        Self::RemoteNotFound { name: name.into() }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

impl From<CommandRunnerError> for RemotesError {
    fn from(error: CommandRunnerError) -> Self {
        let message = match &error {
            CommandRunnerError::SpawnFailed { program, .. } => {
                format!("could not launch {}", program)
            }
            CommandRunnerError::CommandFailed { command, .. } => command.clone(),
        };
        Self::command_error_with_source(message, error)
    }
}

impl From<std::io::Error> for RemotesError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}
