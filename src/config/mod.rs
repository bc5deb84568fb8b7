//! Declared configuration models.
//!
//! Topic and cluster configs are YAML documents written by operators. This
//! module loads them, validates their structure, checks that a topic config
//! agrees with the cluster it targets, and diffs declared settings against a
//! live config map.

pub mod cluster;
pub mod settings;
pub mod topic;
pub mod validator;

pub use cluster::{ClusterConfig, ClusterMeta, ClusterSpec};
pub use settings::{SettingValue, SettingsDiff, TopicSettings, RETENTION_KEY};
pub use topic::{PlacementConfig, PlacementStrategy, TopicConfig, TopicMeta, TopicSpec};
pub use validator::{ConfigValidator, StandardValidator};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading, validating or diffing declared configs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config document is not valid YAML for the expected shape
    #[error("failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Structural validation failed; one entry per problem
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    /// Topic config targets a different cluster than the one supplied
    #[error("topic {field} {topic:?} does not match cluster {field} {cluster:?}")]
    Inconsistent {
        field: &'static str,
        topic: String,
        cluster: String,
    },

    /// A setting value has no broker config string form
    #[error("setting {key} has a nested table value, which cannot be compared")]
    UnsupportedSetting { key: String },
}

/// Read and parse a YAML document from `path`.
pub(crate) fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_yaml(&content, &path.display().to_string())
}

/// Parse a YAML document, naming `context` in errors.
pub(crate) fn parse_yaml<T: DeserializeOwned>(content: &str, context: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        context: context.to_string(),
        source,
    })
}
