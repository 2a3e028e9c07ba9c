//! Merged parameter document and typed accessors
//!
//! A [`ConfigDocument`] is the result of loading a parameter file: an
//! ordered collection of named sections, read-only after construction.
//! Consumers index into sections and read values through the typed
//! getters, mirroring how the simulation side looks parameters up
//! (`solver.num_wind_angles`, `general.output`, ...).

use crate::error::ConfigError;
use serde_yaml::{Mapping, Value};

/// Ordered collection of named parameter sections.
///
/// Sections appear in the order of their first occurrence in the source
/// file. The document owns all of its data and is immutable, so it can be
/// shared across threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
}

impl ConfigDocument {
    pub(crate) fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Sections in first-occurrence order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Section names in first-occurrence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The merged document as a single YAML mapping value.
    pub fn to_value(&self) -> Value {
        let mut root = Mapping::new();
        for section in &self.sections {
            root.insert(
                Value::String(section.name.clone()),
                Value::Mapping(section.entries.clone()),
            );
        }
        Value::Mapping(root)
    }

    /// Render the merged document as YAML. Reloading the output yields an
    /// equal document.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(&self.to_value())
            .map_err(|e| ConfigError::Serialize { message: e.to_string() })
    }

    /// Render the merged document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_value(self.to_value())
            .map_err(|e| ConfigError::Serialize { message: e.to_string() })?;
        serde_json::to_string_pretty(&json)
            .map_err(|e| ConfigError::Serialize { message: e.to_string() })
    }
}

/// A named group of related parameter keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    entries: Mapping,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>, entries: Mapping) -> Self {
        Self { name: name.into(), entries }
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Mapping {
        &mut self.entries
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw key/value entries, in first-occurrence order.
    pub fn entries(&self) -> &Mapping {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw value lookup; the typed getters below are usually what you want.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.type_error(key, "a boolean", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) if n.as_i64().is_some() => Ok(n.as_i64()),
            Some(other) => Err(self.type_error(key, "an integer", other)),
        }
    }

    /// Float read. Integer scalars are accepted, since parameter files
    /// routinely write `viscosity: 5` for a physically real quantity.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) if n.as_f64().is_some() => Ok(n.as_f64()),
            Some(other) => Err(self.type_error(key, "a number", other)),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.type_error(key, "a string", other)),
        }
    }

    pub fn get_list(&self, key: &str) -> Result<Option<&[Value]>, ConfigError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::Sequence(seq)) => Ok(Some(seq.as_slice())),
            Some(other) => Err(self.type_error(key, "a list", other)),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        Ok(self.get_bool(key)?.unwrap_or(default))
    }

    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }

    pub fn float_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        Ok(self.get_float(key)?.unwrap_or(default))
    }

    pub fn str_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self.get_str(key)?.unwrap_or(default).to_string())
    }

    fn type_error(&self, key: &str, expected: &'static str, found: &Value) -> ConfigError {
        ConfigError::Type {
            section: self.name.clone(),
            key: key.to_string(),
            expected,
            found: value_kind(found),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
