// Docker container models

use bollard::models::ContainerStatsResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortInfo {
    pub private_port: u16,
    /// 0 when the port is not published.
    pub public_port: u16,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInfo {
    /// First 12 characters of the engine's container ID.
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: String,
    pub status: String,
    pub created: i64,
    pub ports: Vec<PortInfo>,
    pub labels: HashMap<String, String>,
}

/// GET /api/docker body. `available = false` means the engine could not be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSnapshot {
    pub available: bool,
    pub version: String,
    pub containers: Vec<ContainerInfo>,
    pub total_count: usize,
    pub running_count: usize,
    pub stopped_count: usize,
}

/// Figures derived from one stats reading. Zero where the reading lacks the section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStatsSummary {
    pub id: String,
    pub name: String,
    /// 0 when there is no previous CPU sample to diff against.
    pub cpu_percent: f64,
    pub online_cpus: u32,
    pub memory_usage_bytes: u64,
    pub memory_limit_bytes: u64,
    pub memory_max_usage_bytes: u64,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
    pub block_read_bytes: u64,
    pub block_write_bytes: u64,
    pub pids: u64,
    pub cpu_throttled: bool,
}

/// GET /api/docker/{id}/stats body: the engine's decoded stats document as-is,
/// plus a `summary` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerStatsDetail {
    #[serde(flatten)]
    pub snapshot: ContainerStatsResponse,
    pub summary: ContainerStatsSummary,
}
