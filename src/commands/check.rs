//! Topic check command
//!
//! Loads the declared configs and the cluster snapshot, runs the checklist
//! for every topic config in order and renders the reports.

use crate::cli::args::CheckArgs;
use crate::cli::output::{get_formatter, TopicReport};
use crate::cluster::{ClusterClient, SnapshotCluster};
use crate::config::{ClusterConfig, TopicConfig};
use crate::engine::orchestrator::{CheckOrchestrator, OrchestratorConfig};
use crate::{CheckError, TopicCheckError};
use tracing::{debug, info};

/// Rendered result of a `check` invocation.
#[derive(Debug)]
pub struct CheckOutcome {
    pub reports: Vec<TopicReport>,
    pub output: String,
}

impl CheckOutcome {
    /// True if any check in any topic failed.
    pub fn failed(&self) -> bool {
        self.reports.iter().any(|r| !r.report.all_passed())
    }
}

/// Run the check command
pub fn run(args: &CheckArgs) -> Result<CheckOutcome, TopicCheckError> {
    if args.num_racks == Some(0) {
        return Err(TopicCheckError::Usage(
            "--num-racks must be at least 1".to_string(),
        ));
    }

    let cluster_config = ClusterConfig::load(&args.cluster_config)?;
    cluster_config.validate()?;

    let cluster = match &args.snapshot {
        Some(path) => SnapshotCluster::load(path)?,
        None => SnapshotCluster::default(),
    };

    let config = OrchestratorConfig {
        num_racks: args.num_racks.unwrap_or_else(|| cluster.num_racks()),
        check_leaders: args.check_leaders,
        validate_only: args.validate_only,
    };
    debug!(?config, "resolved check options");

    let topics = args
        .topic_configs
        .iter()
        .map(TopicConfig::load)
        .collect::<Result<Vec<_>, _>>()?;

    let reports = check_all(&cluster, &topics, &cluster_config, config)?;

    let formatter = get_formatter(args.format, args.color_enabled(), args.quiet);
    let output = formatter.format(&reports);

    Ok(CheckOutcome { reports, output })
}

/// Check each topic config against `client`, in order.
///
/// Stops at the first infrastructure error; reports gathered for earlier
/// topics are discarded with it.
pub fn check_all(
    client: &dyn ClusterClient,
    topics: &[TopicConfig],
    cluster_config: &ClusterConfig,
    config: OrchestratorConfig,
) -> Result<Vec<TopicReport>, CheckError> {
    let orchestrator = CheckOrchestrator::new(client, config);

    let mut reports = Vec::with_capacity(topics.len());
    for topic in topics {
        let report = orchestrator.check_topic(topic, cluster_config)?;
        reports.push(TopicReport::new(topic.name(), report));
    }

    info!(topics = reports.len(), "all topics checked");
    Ok(reports)
}
