use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found or not a regular file: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("value of '{key}' in section [{section}] of '{path}' is not a scalar")]
    NonScalarValue {
        path: PathBuf,
        section: String,
        key: String,
    },

    #[error("no [{section}] section in config file '{path}'")]
    MissingSection { section: String, path: PathBuf },

    #[error("missing expected parameter '{key}' in section [{section}] of config file '{path}'")]
    MissingKey {
        key: String,
        section: String,
        path: PathBuf,
    },

    #[error("'{key}' not provided as an override or in section [{section}] of config file '{path}'")]
    MissingOverridableKey {
        key: String,
        section: String,
        path: PathBuf,
    },

    #[error("invalid override '{0}' (expected KEY=VALUE)")]
    InvalidOverride(String),

    #[error("override for '{0}' is not accepted here")]
    OverrideNotAllowed(String),

    #[error("failed to deserialize resolved values: {0}")]
    Deserialize(#[from] toml::de::Error),
}

impl ConfigError {
    /// Returns the key a `MissingKey`/`MissingOverridableKey` error refers to.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key, .. } | Self::MissingOverridableKey { key, .. } => Some(key),
            _ => None,
        }
    }
}
