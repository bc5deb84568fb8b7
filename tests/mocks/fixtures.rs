//! Declared config fixtures.

use topic_check::config::{ClusterConfig, TopicConfig};

pub const CLUSTER_NAME: &str = "local-cluster";
pub const REGION: &str = "us-west-2";
pub const ENVIRONMENT: &str = "dev";

pub const CLUSTER_YAML: &str = r#"
meta:
  name: local-cluster
  region: us-west-2
  environment: dev
  description: Test cluster
spec:
  bootstrapAddrs:
    - broker-1:9092
"#;

pub fn cluster_config() -> ClusterConfig {
    ClusterConfig::from_yaml_str(CLUSTER_YAML).unwrap()
}

/// YAML for a topic targeting the fixture cluster.
pub fn topic_yaml(name: &str, partitions: u32, replication_factor: u32) -> String {
    format!(
        r#"
meta:
  name: {name}
  cluster: {CLUSTER_NAME}
  region: {REGION}
  environment: {ENVIRONMENT}
spec:
  partitions: {partitions}
  replicationFactor: {replication_factor}
"#
    )
}

pub fn topic_config(name: &str, partitions: u32, replication_factor: u32) -> TopicConfig {
    TopicConfig::from_yaml_str(&topic_yaml(name, partitions, replication_factor)).unwrap()
}

/// Topic config with extra lines appended under `spec:`.
pub fn topic_config_with(
    name: &str,
    partitions: u32,
    replication_factor: u32,
    spec_extra: &str,
) -> TopicConfig {
    let yaml = format!(
        "{}{}",
        topic_yaml(name, partitions, replication_factor),
        spec_extra
    );
    TopicConfig::from_yaml_str(&yaml).unwrap()
}
