//! Cluster query interface.
//!
//! Provides consistent interfaces for:
//! - Broker discovery
//! - Live topic metadata (config, partitions, replica state)
//!
//! The check engine only reads from the cluster; nothing here mutates state.

pub mod snapshot;
pub mod topic;

pub use snapshot::{ClusterSnapshot, SnapshotCluster};
pub use topic::{PartitionInfo, TopicInfo, FOLLOWER_THROTTLE_KEY, LEADER_THROTTLE_KEY};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Read-only access to a cluster's brokers and topics.
///
/// Methods take `&self`; implementations that are shared between threads
/// provide their own synchronization.
pub trait ClusterClient {
    /// Fetch every broker currently in the cluster.
    fn get_brokers(&self) -> Result<Vec<BrokerInfo>, ClusterError>;

    /// Fetch live metadata for one topic.
    ///
    /// Fails with [`ClusterError::TopicDoesNotExist`] when the topic is absent.
    /// Partition detail is only populated when `with_partitions` is set.
    fn get_topic(&self, name: &str, with_partitions: bool) -> Result<TopicInfo, ClusterError>;
}

impl<T: ClusterClient + ?Sized> ClusterClient for &T {
    fn get_brokers(&self) -> Result<Vec<BrokerInfo>, ClusterError> {
        (**self).get_brokers()
    }

    fn get_topic(&self, name: &str, with_partitions: bool) -> Result<TopicInfo, ClusterError> {
        (**self).get_topic(name, with_partitions)
    }
}

/// A broker as seen by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerInfo {
    pub id: u32,
    #[serde(default)]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack: Option<String>,
}

/// Errors raised by cluster queries.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The requested topic is not present in the cluster
    #[error("topic {0} does not exist")]
    TopicDoesNotExist(String),

    /// The cluster could not be reached or answered with an error
    #[error("cluster unavailable: {0}")]
    Unavailable(String),

    /// Snapshot file could not be read
    #[error("failed to read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot document is malformed
    #[error("failed to parse snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    /// Snapshot document is well-formed but inconsistent
    #[error("invalid snapshot: {0}")]
    SnapshotInvalid(String),
}

impl ClusterError {
    /// True for the distinguished "topic does not exist" condition.
    pub fn is_topic_missing(&self) -> bool {
        matches!(self, ClusterError::TopicDoesNotExist(_))
    }
}
