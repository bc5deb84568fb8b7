//! Declared topic config.

use super::settings::{SettingValue, TopicSettings, RETENTION_KEY};
use super::{load_yaml, parse_yaml, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Operator-declared desired state of one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub meta: TopicMeta,
    pub spec: TopicSpec,
}

/// Identity of the topic and the cluster it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSpec {
    pub partitions: u32,
    pub replication_factor: u32,
    /// Retention in minutes; zero means "not declared"
    #[serde(default)]
    pub retention_minutes: u64,
    #[serde(default)]
    pub settings: TopicSettings,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_throttle_mb: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default)]
    pub strategy: PlacementStrategy,
}

/// Replica placement strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    /// No placement constraints
    #[default]
    Any,
    /// Partition leaders spread evenly across racks
    BalancedLeaders,
    /// All replicas of a partition in the leader's rack
    InRack,
    /// Replicas of a partition in distinct racks
    CrossRack,
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementStrategy::Any => write!(f, "any"),
            PlacementStrategy::BalancedLeaders => write!(f, "balanced-leaders"),
            PlacementStrategy::InRack => write!(f, "in-rack"),
            PlacementStrategy::CrossRack => write!(f, "cross-rack"),
        }
    }
}

impl TopicConfig {
    /// Load a topic config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_yaml(path.as_ref())
    }

    /// Parse a topic config from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        parse_yaml(content, "topic config")
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }
}

impl TopicSpec {
    /// Settings the live topic is expected to carry.
    ///
    /// A copy of the declared settings with `retention.ms` overwritten from
    /// `retention_minutes` when that is positive.
    pub fn effective_settings(&self) -> TopicSettings {
        let mut settings = self.settings.clone();
        if self.retention_minutes > 0 {
            let millis = self.retention_minutes.saturating_mul(60_000);
            let value = i64::try_from(millis)
                .map(SettingValue::Int)
                .unwrap_or_else(|_| SettingValue::Text(millis.to_string()));
            settings.insert(RETENTION_KEY, value);
        }
        settings
    }
}
