//! Declared topic settings and the settings diff.
//!
//! Brokers report every topic config value as a string, so declared values are
//! rendered to that form before comparison: scalars as written, lists joined
//! with commas.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Topic config key holding retention in milliseconds.
pub const RETENTION_KEY: &str = "retention.ms";

/// A single declared setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<SettingValue>),
    Table(BTreeMap<String, SettingValue>),
}

impl SettingValue {
    /// Render the value the way a broker reports it.
    ///
    /// `key` is only used to name the setting in errors.
    pub fn to_config_string(&self, key: &str) -> Result<String, ConfigError> {
        match self {
            SettingValue::Bool(value) => Ok(value.to_string()),
            SettingValue::Int(value) => Ok(value.to_string()),
            SettingValue::Float(value) => Ok(value.to_string()),
            SettingValue::Text(value) => Ok(value.clone()),
            SettingValue::List(items) => {
                let rendered = items
                    .iter()
                    .map(|item| item.to_config_string(key))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rendered.join(","))
            }
            SettingValue::Table(_) => Err(ConfigError::UnsupportedSetting {
                key: key.to_string(),
            }),
        }
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Keys whose live value differs from, or is missing relative to, the
/// declared settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDiff {
    /// Keys present live with a different value, sorted
    pub differing: Vec<String>,
    /// Declared keys absent from the live config, sorted
    pub missing: Vec<String>,
}

impl SettingsDiff {
    pub fn is_empty(&self) -> bool {
        self.differing.is_empty() && self.missing.is_empty()
    }

    /// Sorted union of differing and missing keys.
    pub fn combined_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .differing
            .iter()
            .chain(self.missing.iter())
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

/// Declared settings map for a topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSettings(BTreeMap<String, SettingValue>);

impl TopicSettings {
    pub fn new() -> Self {
        TopicSettings(BTreeMap::new())
    }

    /// Insert or overwrite a setting.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Diff the declared settings against a live config map.
    ///
    /// Live keys that are not declared are ignored: brokers report every
    /// effective setting, declared or defaulted.
    pub fn config_map_diffs(
        &self,
        live: &BTreeMap<String, String>,
    ) -> Result<SettingsDiff, ConfigError> {
        let mut diff = SettingsDiff::default();

        for (key, value) in &self.0 {
            let desired = value.to_config_string(key)?;
            match live.get(key) {
                Some(actual) if *actual != desired => diff.differing.push(key.clone()),
                Some(_) => {}
                None => diff.missing.push(key.clone()),
            }
        }

        Ok(diff)
    }
}

impl FromIterator<(String, SettingValue)> for TopicSettings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        TopicSettings(iter.into_iter().collect())
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_config_string("") {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => f.write_str("<table>"),
        }
    }
}
