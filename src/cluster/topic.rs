//! Live topic metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Config key listing replicas throttled while leading a migration.
pub const LEADER_THROTTLE_KEY: &str = "leader.replication.throttled.replicas";

/// Config key listing replicas throttled while following a migration.
pub const FOLLOWER_THROTTLE_KEY: &str = "follower.replication.throttled.replicas";

/// Observed state of one partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub id: u32,
    pub leader: u32,
    /// Assigned replicas; the first entry is the preferred leader
    #[serde(default)]
    pub replicas: Vec<u32>,
    /// In-sync replicas
    #[serde(default)]
    pub isr: Vec<u32>,
}

impl PartitionInfo {
    /// True when some assigned replica is missing from the ISR.
    pub fn is_out_of_sync(&self) -> bool {
        self.replicas.iter().any(|replica| !self.isr.contains(replica))
    }

    /// True when the partition is not led by its preferred replica.
    pub fn has_wrong_leader(&self) -> bool {
        self.replicas.first() != Some(&self.leader)
    }
}

/// Observed state of a topic.
///
/// `TopicInfo::default()` describes a topic with no config and no partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInfo {
    pub name: String,
    /// Live topic config as reported by the brokers
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(default)]
    pub partitions: Vec<PartitionInfo>,
}

impl TopicInfo {
    /// True when a partition movement throttle is active on the topic.
    pub fn is_throttled(&self) -> bool {
        [LEADER_THROTTLE_KEY, FOLLOWER_THROTTLE_KEY]
            .iter()
            .any(|key| self.config.get(*key).is_some_and(|value| !value.trim().is_empty()))
    }

    /// Ids of partitions whose ISR does not cover every assigned replica.
    ///
    /// When `subset` is given only those partition ids are considered.
    pub fn out_of_sync_partitions(&self, subset: Option<&[u32]>) -> Vec<u32> {
        self.matching_partitions(subset, PartitionInfo::is_out_of_sync)
    }

    /// Ids of partitions whose leader is not the first assigned replica.
    ///
    /// When `subset` is given only those partition ids are considered.
    pub fn wrong_leader_partitions(&self, subset: Option<&[u32]>) -> Vec<u32> {
        self.matching_partitions(subset, PartitionInfo::has_wrong_leader)
    }

    fn matching_partitions(
        &self,
        subset: Option<&[u32]>,
        predicate: impl Fn(&PartitionInfo) -> bool,
    ) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .partitions
            .iter()
            .filter(|p| subset.map_or(true, |ids| ids.contains(&p.id)))
            .filter(|p| predicate(p))
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
