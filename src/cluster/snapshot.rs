//! File-backed cluster view.
//!
//! A snapshot is a JSON capture of a cluster's brokers and topics. Serving
//! queries from it lets checks run offline, e.g. in CI against state exported
//! earlier by an admin tool.
//!
//! ```json
//! {
//!   "brokers": [{ "id": 1, "host": "broker-1:9092", "rack": "us-west-2a" }],
//!   "topics": [
//!     {
//!       "name": "events",
//!       "config": { "retention.ms": "21600000" },
//!       "partitions": [{ "id": 0, "leader": 1, "replicas": [1], "isr": [1] }]
//!     }
//!   ]
//! }
//! ```

use super::{BrokerInfo, ClusterClient, ClusterError, TopicInfo};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Serialized form of a cluster snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub brokers: Vec<BrokerInfo>,
    #[serde(default)]
    pub topics: Vec<TopicInfo>,
}

/// [`ClusterClient`] answering from a captured snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCluster {
    brokers: Vec<BrokerInfo>,
    topics: BTreeMap<String, TopicInfo>,
}

impl SnapshotCluster {
    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClusterError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading cluster snapshot");

        let content = fs::read_to_string(path).map_err(|source| ClusterError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ClusterError> {
        let snapshot: ClusterSnapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    /// Build from an in-memory snapshot, rejecting duplicate topic names.
    pub fn from_snapshot(snapshot: ClusterSnapshot) -> Result<Self, ClusterError> {
        let mut topics = BTreeMap::new();
        for topic in snapshot.topics {
            if topics.contains_key(&topic.name) {
                return Err(ClusterError::SnapshotInvalid(format!(
                    "topic {} appears more than once",
                    topic.name
                )));
            }
            topics.insert(topic.name.clone(), topic);
        }

        tracing::debug!(
            brokers = snapshot.brokers.len(),
            topics = topics.len(),
            "cluster snapshot loaded"
        );

        Ok(SnapshotCluster {
            brokers: snapshot.brokers,
            topics,
        })
    }

    /// Number of distinct broker racks, at least 1.
    ///
    /// Brokers without a rack label count as one shared rack.
    pub fn num_racks(&self) -> usize {
        let racks: BTreeSet<Option<&str>> = self
            .brokers
            .iter()
            .map(|broker| broker.rack.as_deref())
            .collect();
        racks.len().max(1)
    }

    /// Names of the topics in the snapshot, sorted.
    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}

impl ClusterClient for SnapshotCluster {
    fn get_brokers(&self) -> Result<Vec<BrokerInfo>, ClusterError> {
        Ok(self.brokers.clone())
    }

    fn get_topic(&self, name: &str, with_partitions: bool) -> Result<TopicInfo, ClusterError> {
        let topic = self
            .topics
            .get(name)
            .ok_or_else(|| ClusterError::TopicDoesNotExist(name.to_string()))?;

        let mut info = topic.clone();
        if !with_partitions {
            info.partitions.clear();
        }
        Ok(info)
    }
}
