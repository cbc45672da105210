pub mod cli;
pub mod config;
pub mod generate;
mod error;

pub use config::{ConfigDocument, ConfigError, ConfigSection, Overrides, ResolutionRequest};
pub use error::Error;
