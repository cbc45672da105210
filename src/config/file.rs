//! File-based configuration loading.
//!
//! INI text is handed to `rust-ini`; `.toml` files go through `toml`. Either
//! way the result is flattened to `section -> key -> string`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use toml::{Table, Value};
use tracing::debug;

use super::ConfigError;

pub(crate) type RawSections = BTreeMap<String, BTreeMap<String, String>>;

/// On-disk syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Bracketed sections with `key = value` lines.
    Ini,
    /// TOML where each top-level table is a section.
    Toml,
}

impl Format {
    /// Picks the format from the file extension: `.toml` is TOML, anything else is INI.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Ini,
        }
    }
}

/// Reads and parses a config file.
///
/// The path must name an existing regular file; directories and missing
/// paths are both reported as [`ConfigError::NotFound`].
pub(crate) fn load_config_file(path: &Path) -> Result<RawSections, ConfigError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(ConfigError::NotFound(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_sections(&contents, Format::from_path(path), path)
}

/// Parses document text in the given format. `origin` is only used in diagnostics.
pub(crate) fn parse_sections(
    contents: &str,
    format: Format,
    origin: &Path,
) -> Result<RawSections, ConfigError> {
    match format {
        Format::Ini => parse_ini(contents, origin),
        Format::Toml => parse_toml(contents, origin),
    }
}

fn parse_ini(contents: &str, origin: &Path) -> Result<RawSections, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse {
        path: origin.to_path_buf(),
        message,
    };

    // Backslashes are literal; inline `;`/`#` comments come from the `inline-comment` feature.
    let options = ParseOption {
        enabled_escape: false,
        ..Default::default()
    };
    let ini =
        Ini::load_from_str_opt(contents, options).map_err(|e| parse_error(e.to_string()))?;
    let mut sections = RawSections::new();

    for (name, props) in ini.iter() {
        let Some(name) = name else {
            if !props.is_empty() {
                debug!(
                    path = %origin.display(),
                    keys = props.len(),
                    "ignoring keys outside any section"
                );
            }
            continue;
        };

        if sections.contains_key(name) {
            return Err(parse_error(format!("duplicate section [{name}]")));
        }

        let mut entries = BTreeMap::new();
        for (key, value) in props.iter() {
            if entries.insert(key.to_string(), value.to_string()).is_some() {
                return Err(parse_error(format!(
                    "duplicate key '{key}' in section [{name}]"
                )));
            }
        }
        sections.insert(name.to_string(), entries);
    }

    Ok(sections)
}

fn parse_toml(contents: &str, origin: &Path) -> Result<RawSections, ConfigError> {
    let table: Table = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut sections = RawSections::new();

    for (name, value) in table {
        let Value::Table(section) = value else {
            debug!(path = %origin.display(), key = %name, "ignoring key outside any section");
            continue;
        };

        let mut entries = BTreeMap::new();
        for (key, value) in section {
            let rendered = scalar_to_string(&value).ok_or_else(|| ConfigError::NonScalarValue {
                path: origin.to_path_buf(),
                section: name.clone(),
                key: key.clone(),
            })?;
            entries.insert(key, rendered);
        }
        sections.insert(name, entries);
    }

    Ok(sections)
}

/// Converts a TOML scalar to the string an INI file would have held.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

/// Placeholder origin for documents parsed from memory.
pub(crate) fn inline_origin() -> PathBuf {
    PathBuf::from("<inline>")
}
