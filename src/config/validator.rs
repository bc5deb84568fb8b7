//! Static validation of declared topic configs.
//!
//! The check engine depends only on the [`ConfigValidator`] trait;
//! [`StandardValidator`] is the rule set used by the CLI.

use super::settings::RETENTION_KEY;
use super::topic::PlacementStrategy;
use super::{ClusterConfig, ConfigError, TopicConfig};

/// Topic-level config keys a declared config may set.
///
/// Throttle keys are deliberately absent: they are managed by partition
/// migrations, not declared.
pub const KNOWN_TOPIC_KEYS: &[&str] = &[
    "cleanup.policy",
    "compression.type",
    "delete.retention.ms",
    "file.delete.delay.ms",
    "flush.messages",
    "flush.ms",
    "index.interval.bytes",
    "local.retention.bytes",
    "local.retention.ms",
    "max.compaction.lag.ms",
    "max.message.bytes",
    "message.downconversion.enable",
    "message.format.version",
    "message.timestamp.difference.max.ms",
    "message.timestamp.type",
    "min.cleanable.dirty.ratio",
    "min.compaction.lag.ms",
    "min.insync.replicas",
    "preallocate",
    "remote.storage.enable",
    "retention.bytes",
    "retention.ms",
    "segment.bytes",
    "segment.index.bytes",
    "segment.jitter.ms",
    "segment.ms",
    "unclean.leader.election.enable",
];

/// Structural and cross-resource validation of a declared topic config.
pub trait ConfigValidator {
    /// Validate the topic config on its own, for a cluster with `num_racks`
    /// racks.
    fn validate(&self, topic: &TopicConfig, num_racks: usize) -> Result<(), ConfigError>;

    /// Check that the topic config targets the given cluster.
    fn check_consistency(
        &self,
        topic: &TopicConfig,
        cluster: &ClusterConfig,
    ) -> Result<(), ConfigError>;
}

/// Default validation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidator;

impl ConfigValidator for StandardValidator {
    fn validate(&self, topic: &TopicConfig, num_racks: usize) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        let meta = &topic.meta;
        let spec = &topic.spec;

        for (field, value) in [
            ("name", &meta.name),
            ("cluster", &meta.cluster),
            ("region", &meta.region),
            ("environment", &meta.environment),
        ] {
            if value.is_empty() {
                problems.push(format!("topic {} must be set", field));
            }
        }

        if spec.partitions == 0 {
            problems.push("partitions must be a positive number".to_string());
        }
        if spec.replication_factor == 0 {
            problems.push("replication factor must be a positive number".to_string());
        }

        if spec.retention_minutes > 0 && spec.settings.contains_key(RETENTION_KEY) {
            problems.push(format!(
                "retentionMinutes and the {} setting cannot both be set",
                RETENTION_KEY
            ));
        }

        for key in spec.settings.keys() {
            if !KNOWN_TOPIC_KEYS.contains(&key) {
                problems.push(format!("unknown topic setting: {}", key));
            }
        }

        if num_racks == 0 {
            problems.push("number of racks must be positive".to_string());
        } else {
            match spec.placement.strategy {
                PlacementStrategy::BalancedLeaders => {
                    if spec.partitions as usize % num_racks != 0 {
                        problems.push(format!(
                            "{} placement requires partitions ({}) to be a multiple of the number of racks ({})",
                            spec.placement.strategy, spec.partitions, num_racks
                        ));
                    }
                }
                PlacementStrategy::CrossRack => {
                    if spec.replication_factor as usize > num_racks {
                        problems.push(format!(
                            "{} placement requires replication factor ({}) to be at most the number of racks ({})",
                            spec.placement.strategy, spec.replication_factor, num_racks
                        ));
                    }
                }
                PlacementStrategy::Any | PlacementStrategy::InRack => {}
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    fn check_consistency(
        &self,
        topic: &TopicConfig,
        cluster: &ClusterConfig,
    ) -> Result<(), ConfigError> {
        for (field, topic_value, cluster_value) in [
            ("cluster", &topic.meta.cluster, &cluster.meta.name),
            ("region", &topic.meta.region, &cluster.meta.region),
            ("environment", &topic.meta.environment, &cluster.meta.environment),
        ] {
            if topic_value != cluster_value {
                return Err(ConfigError::Inconsistent {
                    field,
                    topic: topic_value.clone(),
                    cluster: cluster_value.clone(),
                });
            }
        }
        Ok(())
    }
}
