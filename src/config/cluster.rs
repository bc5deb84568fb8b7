//! Declared cluster config.

use super::{load_yaml, parse_yaml, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cluster-level policy a topic config must agree with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub meta: ClusterMeta,
    #[serde(default)]
    pub spec: ClusterSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(default)]
    pub bootstrap_addrs: Vec<String>,
    #[serde(default)]
    pub zk_addrs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zk_prefix: Option<String>,
}

impl ClusterConfig {
    /// Load a cluster config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_yaml(path.as_ref())
    }

    /// Parse a cluster config from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        parse_yaml(content, "cluster config")
    }

    /// Validate the cluster config structure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.meta.name.is_empty() {
            problems.push("cluster name must be set".to_string());
        }
        if self.meta.region.is_empty() {
            problems.push("cluster region must be set".to_string());
        }
        if self.meta.environment.is_empty() {
            problems.push("cluster environment must be set".to_string());
        }
        if self.spec.bootstrap_addrs.is_empty() && self.spec.zk_addrs.is_empty() {
            problems.push("at least one bootstrap or zookeeper address must be set".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}
