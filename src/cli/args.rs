//! Command line arguments for topic-check.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;

/// Parsed command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "topic-check",
    about = "Check declared topic configs against live cluster state",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Command to execute
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the topic checklist for one or more topic configs
    Check(CheckArgs),
    /// List all available checks
    List,
    /// Print version and build information
    Version,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CheckArgs {
    /// Topic config files (YAML)
    #[arg(required = true, value_name = "TOPIC_CONFIG")]
    pub topic_configs: Vec<PathBuf>,

    /// Cluster config file (YAML)
    #[arg(long, value_name = "FILE")]
    pub cluster_config: PathBuf,

    /// Cluster snapshot to check against (JSON)
    #[arg(long, value_name = "FILE", required_unless_present = "validate_only")]
    pub snapshot: Option<PathBuf>,

    /// Number of racks in the cluster (default: derived from the snapshot, else 1)
    #[arg(long, value_name = "N")]
    pub num_racks: Option<usize>,

    /// Also check that partitions are led by their preferred replica
    #[arg(long)]
    pub check_leaders: bool,

    /// Only validate the configs; do not inspect live state
    #[arg(long)]
    pub validate_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "TOPIC_CHECK_FORMAT")]
    pub format: OutputFormat,

    /// Only output failures
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    /// Color is on unless disabled by flag or the `NO_COLOR` convention.
    pub fn color_enabled(&self) -> bool {
        !self.no_color && env::var_os("NO_COLOR").is_none()
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

impl Args {
    /// Parse command line arguments from a slice (for testing)
    pub fn parse_from_slice(args: &[&str]) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once("topic-check").chain(args.iter().copied()))
    }

    /// Default log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
