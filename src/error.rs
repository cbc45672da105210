use std::path::PathBuf;

use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the deploy-cfg library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
