//! topic-check library
//!
//! Compliance checks for message topics: compares a declared topic config
//! against the live state of a cluster and reports drift.
//!
//! This library provides:
//! - An ordered check engine with short-circuiting static checks
//! - Declared topic and cluster config models (YAML)
//! - A live topic metadata model and the cluster query interface
//! - Terminal, JSON and JUnit XML report output
//!
//! # Example
//!
//! ```no_run
//! use topic_check::cluster::SnapshotCluster;
//! use topic_check::config::{ClusterConfig, TopicConfig};
//! use topic_check::{run_checks, OrchestratorConfig};
//!
//! let cluster = SnapshotCluster::load("snapshot.json").expect("snapshot");
//! let topic = TopicConfig::load("topics/events.yaml").expect("topic config");
//! let cluster_config = ClusterConfig::load("cluster.yaml").expect("cluster config");
//!
//! let report = run_checks(&cluster, &topic, &cluster_config, OrchestratorConfig::default())
//!     .expect("cluster reachable");
//! println!("Checks passed: {}", report.summary().passed);
//! ```

pub mod cli;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod engine;
pub mod version;

use cluster::{ClusterClient, ClusterError};
use config::{ClusterConfig, ConfigError, TopicConfig};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// Re-exports for public API
pub use engine::orchestrator::{CheckOrchestrator, OrchestratorConfig};
pub use engine::result::{CheckHandle, CheckReport, CheckResult, CheckSummary};

/// Identifies one check in the topic checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckName {
    /// Declared topic config passes static validation
    ConfigCorrect,
    /// Declared topic config agrees with the cluster config
    ConfigsConsistent,
    /// Live topic settings match the declared settings
    ConfigSettingsCorrect,
    /// Replication factor is a multiple of the broker count
    ReplicationFactorCorrect,
    /// Partition count is a multiple of the broker count
    PartitionCountCorrect,
    /// No partition movement throttles are active
    ThrottlesClear,
    /// Every partition has all of its replicas in sync
    ReplicasInSync,
    /// Every partition is led by its preferred replica
    LeadersCorrect,
}

impl CheckName {
    /// Every check, in evaluation order.
    pub const ALL: [CheckName; 8] = [
        CheckName::ConfigCorrect,
        CheckName::ConfigsConsistent,
        CheckName::ConfigSettingsCorrect,
        CheckName::ReplicationFactorCorrect,
        CheckName::PartitionCountCorrect,
        CheckName::ThrottlesClear,
        CheckName::ReplicasInSync,
        CheckName::LeadersCorrect,
    ];

    /// Stable identifier used in machine-readable output.
    pub fn id(&self) -> &'static str {
        match self {
            CheckName::ConfigCorrect => "config-correct",
            CheckName::ConfigsConsistent => "configs-consistent",
            CheckName::ConfigSettingsCorrect => "config-settings-correct",
            CheckName::ReplicationFactorCorrect => "replication-factor-correct",
            CheckName::PartitionCountCorrect => "partition-count-correct",
            CheckName::ThrottlesClear => "throttles-clear",
            CheckName::ReplicasInSync => "replicas-in-sync",
            CheckName::LeadersCorrect => "leaders-correct",
        }
    }

    /// Human-readable name
    pub fn title(&self) -> &'static str {
        match self {
            CheckName::ConfigCorrect => "Config Correct",
            CheckName::ConfigsConsistent => "Configs Consistent",
            CheckName::ConfigSettingsCorrect => "Config Settings Correct",
            CheckName::ReplicationFactorCorrect => "Replication Factor Correct",
            CheckName::PartitionCountCorrect => "Partition Count Correct",
            CheckName::ThrottlesClear => "Throttles Clear",
            CheckName::ReplicasInSync => "Replicas In Sync",
            CheckName::LeadersCorrect => "Leaders Correct",
        }
    }

    /// Description of what this check validates
    pub fn description(&self) -> &'static str {
        match self {
            CheckName::ConfigCorrect => "Validate the declared topic config structure",
            CheckName::ConfigsConsistent => "Match the topic config against the cluster config",
            CheckName::ConfigSettingsCorrect => {
                "Compare declared settings with the live topic config (existing topics only)"
            }
            CheckName::ReplicationFactorCorrect => {
                "Replication factor must be a multiple of the broker count"
            }
            CheckName::PartitionCountCorrect => {
                "Partition count must be a multiple of the broker count, or exactly 1"
            }
            CheckName::ThrottlesClear => "Topic has no active replication throttles",
            CheckName::ReplicasInSync => "All partition replicas are in the ISR",
            CheckName::LeadersCorrect => {
                "All partitions are led by their preferred replica (--check-leaders)"
            }
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Infrastructure failure that prevented a check run from completing.
///
/// Per-check failures are never reported through this type; they are recorded
/// in the [`CheckReport`].
#[derive(Debug, Error)]
pub enum CheckError {
    /// The broker set could not be fetched
    #[error("failed to get brokers: {0}")]
    Brokers(#[source] ClusterError),

    /// The live topic could not be fetched for a reason other than absence
    #[error("failed to get topic {topic}: {source}")]
    Topic {
        topic: String,
        #[source]
        source: ClusterError,
    },

    /// The declared and live settings could not be compared
    #[error("failed to diff topic settings: {0}")]
    SettingsDiff(#[from] ConfigError),
}

/// Error types for topic-check operations.
#[derive(Debug, Error)]
pub enum TopicCheckError {
    /// A declared config could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The cluster view could not be loaded or queried
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// A check run did not complete
    #[error(transparent)]
    Check(#[from] CheckError),

    /// Invalid combination of command line options
    #[error("{0}")]
    Usage(String),
}

/// Run the topic checklist.
///
/// This is the main entry point for checking one topic with the standard
/// config validator.
///
/// # Returns
///
/// Returns the `CheckReport` of every evaluated check, or a `CheckError` if an
/// infrastructure failure stopped the run. Failed checks are not errors.
pub fn run_checks(
    client: &dyn ClusterClient,
    topic_config: &TopicConfig,
    cluster_config: &ClusterConfig,
    config: OrchestratorConfig,
) -> Result<CheckReport, CheckError> {
    CheckOrchestrator::new(client, config).check_topic(topic_config, cluster_config)
}
