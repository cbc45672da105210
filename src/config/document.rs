//! Loaded configuration documents and their sections.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::file::{inline_origin, load_config_file, parse_sections, Format, RawSections};
use super::ConfigError;

/// A parsed configuration file: section name to [`ConfigSection`].
///
/// Read-only after load. The source path is kept so every lookup failure
/// can name the file the operator has to fix.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: PathBuf,
    sections: BTreeMap<String, ConfigSection>,
}

/// A named group of `key = value` pairs. Keys are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ConfigDocument {
    /// Reads and parses the file at `path`.
    ///
    /// Fails with [`ConfigError::NotFound`] unless `path` is an existing
    /// regular file, and with [`ConfigError::Parse`] on malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = load_config_file(path)?;
        debug!(path = %path.display(), sections = raw.len(), "loaded config document");
        Ok(Self::from_raw(path.to_path_buf(), raw))
    }

    /// Parses a document held in memory. Diagnostics report it as `<inline>`.
    pub fn parse(contents: &str, format: Format) -> Result<Self, ConfigError> {
        let origin = inline_origin();
        let raw = parse_sections(contents, format, &origin)?;
        Ok(Self::from_raw(origin, raw))
    }

    fn from_raw(path: PathBuf, raw: RawSections) -> Self {
        let sections = raw
            .into_iter()
            .map(|(name, entries)| {
                let section = ConfigSection {
                    name: name.clone(),
                    path: path.clone(),
                    entries,
                };
                (name, section)
            })
            .collect();
        Self { path, sections }
    }

    /// Looks up a section by name.
    pub fn section(&self, name: &str) -> Result<&ConfigSection, ConfigError> {
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::MissingSection {
                section: name.to_string(),
                path: self.path.clone(),
            })
    }
}

impl ConfigSection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, failing with [`ConfigError::MissingKey`] if absent.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| self.missing(key, false))
    }

    /// Returns the value for `key` if present, otherwise `default`.
    ///
    /// `None` means neither supplied a value; callers treat that as a missing key.
    pub fn resolve<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.get(key).or(default)
    }

    pub(crate) fn missing(&self, key: &str, overridable: bool) -> ConfigError {
        let (key, section, path) = (key.to_string(), self.name.clone(), self.path.clone());
        if overridable {
            ConfigError::MissingOverridableKey { key, section, path }
        } else {
            ConfigError::MissingKey { key, section, path }
        }
    }
}
