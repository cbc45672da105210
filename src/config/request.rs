//! Resolution of a caller-described set of keys against one section.
//!
//! Precedence for each key: an override (only if the key is override-eligible),
//! then the section value, then the default (optional keys only). Resolution
//! is all-or-nothing: the first miss aborts before any result exists.

use std::fmt;

use serde::de::DeserializeOwned;
use toml::{Table, Value};
use tracing::debug;

use super::{ConfigError, ConfigSection, Overrides};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    Override,
    Section,
    Default,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueOrigin::Override => "override",
            ValueOrigin::Section => "section",
            ValueOrigin::Default => "default",
        })
    }
}

/// One key a caller needs from a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    key: String,
    required: bool,
    default: Option<String>,
    overridable: bool,
}

impl KeySpec {
    /// A key that must come from an override or the section. Defaults never apply.
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: true,
            default: None,
            overridable: false,
        }
    }

    /// A key that falls back to `default` when absent.
    ///
    /// With `default = None` the key still has to be supplied somehow;
    /// a miss is reported exactly like a required key.
    pub fn optional(key: impl Into<String>, default: Option<impl Into<String>>) -> Self {
        Self {
            key: key.into(),
            required: false,
            default: default.map(Into::into),
            overridable: false,
        }
    }

    /// Allows an explicit override to replace the section value.
    pub fn overridable(mut self) -> Self {
        self.overridable = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

}

/// Ordered list of [`KeySpec`]s to resolve against a section.
#[derive(Debug, Clone, Default)]
#[must_use = "requests do nothing until .resolve() is called"]
pub struct ResolutionRequest {
    specs: Vec<KeySpec>,
}

impl ResolutionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key spec. A spec for a key already in the request replaces it in place.
    pub fn key(mut self, spec: KeySpec) -> Self {
        match self.specs.iter_mut().find(|s| s.key == spec.key) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
        self
    }

    pub fn require(self, key: impl Into<String>) -> Self {
        self.key(KeySpec::required(key))
    }

    pub fn optional(self, key: impl Into<String>, default: Option<impl Into<String>>) -> Self {
        self.key(KeySpec::optional(key, default))
    }

    /// Marks every key added so far as override-eligible.
    pub fn all_overridable(mut self) -> Self {
        for spec in &mut self.specs {
            spec.overridable = true;
        }
        self
    }

    pub fn specs(&self) -> &[KeySpec] {
        &self.specs
    }

    /// Resolves every requested key against `section`.
    ///
    /// Fails with [`ConfigError::OverrideNotAllowed`] if `overrides` names a key
    /// that is not requested or not override-eligible, and with a missing-key
    /// error for the first key nothing supplies.
    pub fn resolve(
        &self,
        section: &ConfigSection,
        overrides: &Overrides,
    ) -> Result<ResolutionResult, ConfigError> {
        if let Some(rejected) = overrides
            .keys()
            .find(|key| !self.specs.iter().any(|s| s.overridable && s.key == *key))
        {
            return Err(ConfigError::OverrideNotAllowed(rejected.to_string()));
        }

        let mut values = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let (value, origin) = resolve_one(spec, section, overrides)
                .ok_or_else(|| section.missing(&spec.key, spec.overridable))?;
            debug!(section = section.name(), key = %spec.key, ?origin, "resolved config value");
            values.push(ResolvedValue {
                key: spec.key.clone(),
                value: value.to_string(),
                origin,
            });
        }

        Ok(ResolutionResult { values })
    }
}

fn resolve_one<'a>(
    spec: &'a KeySpec,
    section: &'a ConfigSection,
    overrides: &'a Overrides,
) -> Option<(&'a str, ValueOrigin)> {
    if spec.overridable {
        if let Some(value) = overrides.get(&spec.key) {
            return Some((value, ValueOrigin::Override));
        }
    }
    if let Some(value) = section.get(&spec.key) {
        return Some((value, ValueOrigin::Section));
    }
    if spec.required {
        return None;
    }
    spec.default
        .as_deref()
        .map(|value| (value, ValueOrigin::Default))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedValue {
    key: String,
    value: String,
    origin: ValueOrigin,
}

/// Fully resolved values, one per requested key, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    values: Vec<ResolvedValue>,
}

impl ResolutionResult {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key).map(|v| v.value.as_str())
    }

    pub fn origin(&self, key: &str) -> Option<ValueOrigin> {
        self.find(key).map(|v| v.origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|v| (v.key.as_str(), v.value.as_str()))
    }

    /// Deserializes the resolved values into `T`.
    ///
    /// Strings are coerced to the most specific type first (boolean, integer,
    /// float, string), so numeric fields can be declared as numbers.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let table: Table = self
            .values
            .iter()
            .map(|v| (v.key.clone(), coerce_value(&v.value)))
            .collect();
        Ok(Value::Table(table).try_into()?)
    }

    fn find(&self, key: &str) -> Option<&ResolvedValue> {
        self.values.iter().find(|v| v.key == key)
    }
}

/// Maps a resolved string to the value serde sees.
///
/// Only lowercase `true`/`false` become booleans and only signed decimal
/// digits become integers; `TRUE`, `0x10` or an overflowing number stay strings.
fn coerce_value(s: &str) -> Value {
    let string = || Value::String(s.to_string());
    match s {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ if is_decimal_integer(s) => s.parse().map_or_else(|_| string(), Value::Integer),
        _ if s.contains('.') => s.parse().map_or_else(|_| string(), Value::Float),
        _ => string(),
    }
}

fn is_decimal_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
