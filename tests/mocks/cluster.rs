//! Mock cluster for testing.
//!
//! Provides a configurable [`ClusterClient`] that simulates:
//! - Clusters of any broker count
//! - Healthy, throttled, lagging and leader-skewed topics
//! - Broker and topic query failures

use std::cell::Cell;
use std::collections::BTreeMap;
use topic_check::cluster::{BrokerInfo, ClusterClient, ClusterError, PartitionInfo, TopicInfo};
use topic_check::cluster::{FOLLOWER_THROTTLE_KEY, LEADER_THROTTLE_KEY};

/// In-memory cluster with injectable failures.
#[derive(Debug, Default)]
pub struct MockCluster {
    brokers: Vec<BrokerInfo>,
    topics: BTreeMap<String, TopicInfo>,
    broker_error: Option<String>,
    topic_error: Option<String>,
    topic_calls: Cell<usize>,
}

impl MockCluster {
    /// Cluster with `count` brokers (ids 1..=count) and no topics.
    pub fn with_brokers(count: u32) -> Self {
        MockCluster {
            brokers: (1..=count)
                .map(|id| BrokerInfo {
                    id,
                    host: format!("broker-{}:9092", id),
                    rack: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_topic(mut self, topic: TopicInfo) -> Self {
        self.topics.insert(topic.name.clone(), topic);
        self
    }

    /// Every broker query fails with `message`.
    pub fn failing_brokers(mut self, message: &str) -> Self {
        self.broker_error = Some(message.to_string());
        self
    }

    /// Every topic query fails with `message` (not a missing-topic error).
    pub fn failing_topics(mut self, message: &str) -> Self {
        self.topic_error = Some(message.to_string());
        self
    }

    /// Number of `get_topic` calls made so far.
    pub fn topic_calls(&self) -> usize {
        self.topic_calls.get()
    }
}

impl ClusterClient for MockCluster {
    fn get_brokers(&self) -> Result<Vec<BrokerInfo>, ClusterError> {
        match &self.broker_error {
            Some(message) => Err(ClusterError::Unavailable(message.clone())),
            None => Ok(self.brokers.clone()),
        }
    }

    fn get_topic(&self, name: &str, with_partitions: bool) -> Result<TopicInfo, ClusterError> {
        self.topic_calls.set(self.topic_calls.get() + 1);

        if let Some(message) = &self.topic_error {
            return Err(ClusterError::Unavailable(message.clone()));
        }

        let mut topic = self
            .topics
            .get(name)
            .cloned()
            .ok_or_else(|| ClusterError::TopicDoesNotExist(name.to_string()))?;
        if !with_partitions {
            topic.partitions.clear();
        }
        Ok(topic)
    }
}

/// Builder for live topic state.
#[derive(Debug, Clone)]
pub struct MockTopic {
    info: TopicInfo,
}

impl MockTopic {
    /// Healthy topic: `partitions` partitions spread over `brokers` brokers
    /// with `replication_factor` replicas each, all in sync and led by the
    /// preferred replica.
    pub fn healthy(name: &str, partitions: u32, replication_factor: u32, brokers: u32) -> Self {
        let partitions = (0..partitions)
            .map(|id| {
                let replicas: Vec<u32> = (0..replication_factor)
                    .map(|r| (id + r) % brokers + 1)
                    .collect();
                PartitionInfo {
                    id,
                    leader: replicas[0],
                    isr: replicas.clone(),
                    replicas,
                }
            })
            .collect();

        MockTopic {
            info: TopicInfo {
                name: name.to_string(),
                config: BTreeMap::new(),
                partitions,
            },
        }
    }

    pub fn config(mut self, key: &str, value: &str) -> Self {
        self.info.config.insert(key.to_string(), value.to_string());
        self
    }

    /// Add a leader throttle on every replica.
    pub fn throttled(self) -> Self {
        self.config(LEADER_THROTTLE_KEY, "*")
    }

    /// Add a follower throttle on one replica.
    pub fn follower_throttled(self) -> Self {
        self.config(FOLLOWER_THROTTLE_KEY, "0:1")
    }

    /// Drop the last replica of each listed partition from its ISR.
    pub fn lagging(mut self, ids: &[u32]) -> Self {
        for partition in &mut self.info.partitions {
            if ids.contains(&partition.id) {
                partition.isr.pop();
            }
        }
        self
    }

    /// Hand leadership of each listed partition to its second replica.
    pub fn misled(mut self, ids: &[u32]) -> Self {
        for partition in &mut self.info.partitions {
            if ids.contains(&partition.id) {
                if let Some(&second) = partition.replicas.get(1) {
                    partition.leader = second;
                }
            }
        }
        self
    }

    pub fn build(self) -> TopicInfo {
        self.info
    }
}
