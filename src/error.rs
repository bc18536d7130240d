// Gestion des erreurs du routeur

use std::fmt;
use std::error::Error as StdError;

use crate::types::PortId;

#[derive(Debug)]
pub enum AppError {
    /// Invalid or conflicting configuration. The node must not start.
    ConfigError(String),
    /// Lookup against a port whose link is not up.
    UnknownPort(PortId),
    IOError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::UnknownPort(port) => write!(f, "Unknown port: {} is not up", port),
            AppError::IOError(err) => write!(f, "IO error: {}", err),
            AppError::SerializationError(err) => write!(f, "Serialization error: {}", err),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppError::IOError(err) => Some(err),
            AppError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IOError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
