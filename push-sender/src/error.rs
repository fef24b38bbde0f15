//! Error types for the push sender.

use push_common::PayloadError;

/// Error types for dispatch operations.
///
/// Only `Validation` aborts a whole dispatch. `Serialization` and `Transport`
/// end a single attempt and are recorded in its report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid push request: {0}")]
    Validation(String),

    #[error("Payload serialization failed: {0}")]
    Serialization(String),

    #[error("Gateway transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request file error: {0}")]
    RequestFile(String),
}

impl Error {
    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::Serialization(_) => "serialization",
            Error::Transport(_) => "transport",
            Error::Config(_) => "config",
            Error::RequestFile(_) => "request_file",
        }
    }
}

impl From<PayloadError> for Error {
    fn from(err: PayloadError) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
