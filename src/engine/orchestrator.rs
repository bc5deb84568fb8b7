//! Check execution orchestrator.
//!
//! Runs the topic checklist in a single top-to-bottom pass.
//!
//! # Short-circuiting
//!
//! - Broker query failure: the run fails with [`CheckError::Brokers`]
//! - ConfigCorrect / ConfigsConsistent failure: the report is returned with
//!   the failed check as its last entry; no later check is evaluated
//! - `validate_only`: the report is returned after the two static checks,
//!   without querying the live topic
//! - Topic does not exist: ConfigSettingsCorrect is skipped (not appended);
//!   the live-state checks run against an empty [`TopicInfo`] and pass
//! - Topic query failure for any other reason, or a settings diff failure:
//!   the run fails with a [`CheckError`]

use crate::cluster::{ClusterClient, TopicInfo};
use crate::config::{ClusterConfig, ConfigValidator, StandardValidator, TopicConfig};
use crate::engine::result::{CheckHandle, CheckReport};
use crate::{CheckError, CheckName};
use tracing::{debug, info, info_span, warn};

/// Outcome of one check: `Err` carries the failure message.
type Verdict = Result<(), String>;

/// Orchestrator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Racks in the cluster, used by placement validation
    pub num_racks: usize,
    /// Also check that partitions are led by their preferred replica
    pub check_leaders: bool,
    /// Stop after the static config checks
    pub validate_only: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig {
            num_racks: 1,
            check_leaders: false,
            validate_only: false,
        }
    }
}

/// Result of looking up the live topic.
#[derive(Debug)]
enum TopicLookup {
    Found(TopicInfo),
    Missing,
}

/// Check orchestrator
pub struct CheckOrchestrator<'a> {
    client: &'a dyn ClusterClient,
    validator: &'a dyn ConfigValidator,
    config: OrchestratorConfig,
}

impl<'a> CheckOrchestrator<'a> {
    /// Create a new orchestrator using the standard config validator
    pub fn new(client: &'a dyn ClusterClient, config: OrchestratorConfig) -> Self {
        CheckOrchestrator {
            client,
            validator: &StandardValidator,
            config,
        }
    }

    /// Replace the config validator
    pub fn with_validator(mut self, validator: &'a dyn ConfigValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run every applicable check for `topic` and return the report.
    pub fn check_topic(
        &self,
        topic: &TopicConfig,
        cluster: &ClusterConfig,
    ) -> Result<CheckReport, CheckError> {
        let span = info_span!("check_topic", topic = %topic.meta.name);
        let _enter = span.enter();

        let mut report = CheckReport::new();

        let brokers = self.client.get_brokers().map_err(|err| {
            warn!(error = %err, "broker query failed");
            CheckError::Brokers(err)
        })?;
        let broker_count = brokers.len();
        debug!(broker_count, "fetched brokers");

        let handle = report.append(CheckName::ConfigCorrect);
        let verdict = self
            .validator
            .validate(topic, self.config.num_racks)
            .map_err(|err| format!("config validation error: {}", err));
        if !settle(&mut report, handle, verdict) {
            info!("declared config is invalid, skipping remaining checks");
            return Ok(report);
        }

        let handle = report.append(CheckName::ConfigsConsistent);
        let verdict = self
            .validator
            .check_consistency(topic, cluster)
            .map_err(|err| format!("config consistency error: {}", err));
        if !settle(&mut report, handle, verdict) {
            info!("declared config is inconsistent with the cluster, skipping remaining checks");
            return Ok(report);
        }

        if self.config.validate_only {
            return Ok(report);
        }

        let live = match self.lookup_topic(&topic.meta.name)? {
            TopicLookup::Found(live) => {
                let handle = report.append(CheckName::ConfigSettingsCorrect);
                let verdict = settings_verdict(topic, &live)?;
                settle(&mut report, handle, verdict);
                live
            }
            TopicLookup::Missing => {
                info!("topic does not exist yet, skipping settings check");
                // Throttle, sync and leader checks below pass trivially
                // against the empty topic.
                TopicInfo::default()
            }
        };

        let handle = report.append(CheckName::ReplicationFactorCorrect);
        settle(
            &mut report,
            handle,
            replication_factor_verdict(topic.spec.replication_factor, broker_count),
        );

        let handle = report.append(CheckName::PartitionCountCorrect);
        settle(
            &mut report,
            handle,
            partition_count_verdict(topic.spec.partitions, broker_count),
        );

        let handle = report.append(CheckName::ThrottlesClear);
        let verdict = if live.is_throttled() {
            Err("topic has existing throttles".to_string())
        } else {
            Ok(())
        };
        settle(&mut report, handle, verdict);

        let handle = report.append(CheckName::ReplicasInSync);
        let out_of_sync = live.out_of_sync_partitions(None);
        settle(
            &mut report,
            handle,
            partition_verdict(&out_of_sync, &live, "have out-of-sync replicas"),
        );

        if self.config.check_leaders {
            let handle = report.append(CheckName::LeadersCorrect);
            let wrong_leaders = live.wrong_leader_partitions(None);
            settle(
                &mut report,
                handle,
                partition_verdict(&wrong_leaders, &live, "have wrong leaders"),
            );
        }

        let summary = report.summary();
        info!(
            passed = summary.passed,
            failed = summary.failed,
            "topic checks complete"
        );
        Ok(report)
    }

    fn lookup_topic(&self, name: &str) -> Result<TopicLookup, CheckError> {
        match self.client.get_topic(name, true) {
            Ok(info) => Ok(TopicLookup::Found(info)),
            Err(err) if err.is_topic_missing() => Ok(TopicLookup::Missing),
            Err(err) => {
                warn!(error = %err, "topic query failed");
                Err(CheckError::Topic {
                    topic: name.to_string(),
                    source: err,
                })
            }
        }
    }
}

/// Finalize `handle` from `verdict`, returning whether the check passed.
fn settle(report: &mut CheckReport, handle: CheckHandle, verdict: Verdict) -> bool {
    let name = handle.name();
    match verdict {
        Ok(()) => {
            debug!(check = %name, "check passed");
            report.pass(handle);
            true
        }
        Err(message) => {
            debug!(check = %name, %message, "check failed");
            report.fail(handle, message);
            false
        }
    }
}

fn settings_verdict(topic: &TopicConfig, live: &TopicInfo) -> Result<Verdict, CheckError> {
    let desired = topic.spec.effective_settings();
    let diff = desired.config_map_diffs(&live.config)?;

    if diff.is_empty() {
        return Ok(Ok(()));
    }

    let keys = diff.combined_keys();
    Ok(Err(format!(
        "{} keys have different values between cluster and topic config: {}",
        keys.len(),
        keys.join(", ")
    )))
}

/// `value` is a whole multiple of a non-zero broker count.
fn divisible_by_brokers(value: u32, broker_count: usize) -> bool {
    broker_count != 0 && value as usize % broker_count == 0
}

fn replication_factor_verdict(replication_factor: u32, broker_count: usize) -> Verdict {
    if divisible_by_brokers(replication_factor, broker_count) {
        Ok(())
    } else {
        Err(format!(
            "replication factor {} must be a multiple of broker count {}",
            replication_factor, broker_count
        ))
    }
}

fn partition_count_verdict(partitions: u32, broker_count: usize) -> Verdict {
    // Single-partition topics are valid regardless of broker count
    if partitions == 1 || divisible_by_brokers(partitions, broker_count) {
        Ok(())
    } else {
        Err(format!(
            "partition count {} must be a multiple of broker count {}",
            partitions, broker_count
        ))
    }
}

fn partition_verdict(flagged: &[u32], live: &TopicInfo, problem: &str) -> Verdict {
    if flagged.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{}/{} partitions {}",
            flagged.len(),
            live.partitions.len(),
            problem
        ))
    }
}
