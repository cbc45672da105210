//! Values supplied outside the config file.

use std::collections::BTreeMap;

use super::ConfigError;

/// Explicit per-key values that take precedence over a section's contents.
///
/// Later insertions replace earlier ones, so merge lower-priority sources
/// (environment) before higher-priority ones (command line).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    values: BTreeMap<String, String>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Adds `value` under `key` when it is `Some`.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Parses a `KEY=VALUE` assignment and adds it.
    ///
    /// The value may be empty or contain further `=`; the key may not be empty.
    pub fn push_assignment(&mut self, assignment: &str) -> Result<&mut Self, ConfigError> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok(self.insert(key.trim(), value.trim()))
            }
            _ => Err(ConfigError::InvalidOverride(assignment.to_string())),
        }
    }

    /// Collects overrides from `PREFIX__...` variables, e.g. `std::env::vars()`.
    ///
    /// After the prefix, the name is lowercased, `__` becomes `.` and `_`
    /// becomes `-`: `DEPLOY__SERVER_THREADS` overrides `server-threads` and
    /// `DEPLOY__TEST__TEMP_DIR` overrides `test.temp-dir`.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let prefix_with_sep = format!("{prefix}__");
        let mut overrides = Self::new();

        for (name, value) in vars {
            let Some(rest) = name.as_ref().strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }

            let key = rest
                .split("__")
                .map(|segment| segment.to_lowercase().replace('_', "-"))
                .collect::<Vec<_>>()
                .join(".");
            overrides.insert(key, value);
        }

        overrides
    }

    /// Applies every entry of `other` on top of `self`.
    pub fn merge(&mut self, other: Overrides) -> &mut Self {
        self.values.extend(other.values);
        self
    }

    /// Drops every entry whose key fails `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> &mut Self {
        self.values.retain(|key, _| keep(key.as_str()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
