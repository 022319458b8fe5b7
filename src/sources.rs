// Capability traits for the external data sources and the raw readings they return.
// Collectors only see these; SysinfoRepo and DockerRepo are the production impls.

use std::collections::HashMap;
use std::time::Duration;

use bollard::models::ContainerStatsResponse;
use futures_util::future::BoxFuture;

use crate::error::{EngineError, SourceError};
use crate::models::PortInfo;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    pub platform: String,
    pub os: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    pub logical_cores: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryReading {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReading {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub key: String,
    pub celsius: f64,
}

/// A mounted partition as enumerated by the OS (no usage yet).
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

/// Cumulative traffic counters for one interface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IoCounter {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// Interface metadata: addresses in CIDR form and the kernel flag names ("up", "loopback", ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceEntry {
    pub name: String,
    pub addresses: Vec<String>,
    pub flags: Vec<String>,
}

/// Blocking OS metrics reads. Every method is independent; one failing says nothing about the others.
pub trait HostMetricsSource: Send + Sync {
    fn hostname(&self) -> Result<String, SourceError>;
    fn host_info(&self) -> Result<HostInfo, SourceError>;
    fn cpu_info(&self) -> Result<CpuInfo, SourceError>;
    /// Per-logical-core usage measured across `interval`. Blocks for that long.
    fn cpu_percent(&self, interval: Duration) -> Result<Vec<f64>, SourceError>;
    fn virtual_memory(&self) -> Result<MemoryReading, SourceError>;
    fn load_average(&self) -> Result<LoadReading, SourceError>;
    fn temperatures(&self) -> Result<Vec<SensorReading>, SourceError>;
    fn partitions(&self) -> Result<Vec<PartitionEntry>, SourceError>;
    fn disk_usage(&self, mount_point: &str) -> Result<DiskUsage, SourceError>;
    fn io_counters(&self) -> Result<Vec<IoCounter>, SourceError>;
    fn interfaces(&self) -> Result<Vec<InterfaceEntry>, SourceError>;
}

/// A container as listed by the engine, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineContainer {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub state: String,
    pub status: String,
    pub created: i64,
    pub ports: Vec<PortInfo>,
    pub labels: HashMap<String, String>,
}

/// Opens a fresh engine connection; one per request.
pub trait ContainerEngine: Send + Sync {
    fn connect(&self) -> Result<Box<dyn ContainerEngineClient>, EngineError>;
}

/// One open engine connection. Callers bound each future with their own deadline.
pub trait ContainerEngineClient: Send + Sync {
    fn server_version(&self) -> BoxFuture<'_, Result<String, EngineError>>;
    fn list_all_containers(&self) -> BoxFuture<'_, Result<Vec<EngineContainer>, EngineError>>;
    fn container_stats<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<ContainerStatsResponse, EngineError>>;
}
