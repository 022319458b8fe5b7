// Shared test fakes for the host metrics source and the container engine
#![allow(dead_code)]

use bollard::models::ContainerStatsResponse;
use futures_util::future::BoxFuture;
use server_nexus::error::{EngineError, SourceError};
use server_nexus::models::PortInfo;
use server_nexus::sources::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Each `None` field makes the matching read fail.
#[derive(Clone, Default)]
pub struct FakeHost {
    pub hostname: Option<String>,
    pub host_info: Option<HostInfo>,
    pub cpu_info: Option<CpuInfo>,
    pub cpu_percent: Option<Vec<f64>>,
    pub memory: Option<MemoryReading>,
    pub load: Option<LoadReading>,
    pub temperatures: Option<Vec<SensorReading>>,
    pub partitions: Option<Vec<PartitionEntry>>,
    /// Keyed by mount point; a missing mount fails its usage read.
    pub usage: HashMap<String, DiskUsage>,
    pub io_counters: Option<Vec<IoCounter>>,
    pub interfaces: Option<Vec<InterfaceEntry>>,
    /// Makes the CPU sampler panic, as a crashed blocking task would.
    pub panic_on_cpu_sample: bool,
    pub sampled_intervals: Arc<Mutex<Vec<Duration>>>,
    pub usage_calls: Arc<Mutex<Vec<String>>>,
}

fn read<T: Clone>(value: &Option<T>, what: &str) -> Result<T, SourceError> {
    value
        .clone()
        .ok_or_else(|| SourceError::Unavailable(what.to_string()))
}

impl FakeHost {
    /// A host where every read succeeds with plausible values.
    pub fn healthy() -> Self {
        Self {
            hostname: Some("pi-server".into()),
            host_info: Some(HostInfo {
                platform: "raspbian".into(),
                os: "linux".into(),
                uptime_secs: 90_061,
            }),
            cpu_info: Some(CpuInfo {
                model: "Cortex-A72".into(),
                logical_cores: 4,
            }),
            cpu_percent: Some(vec![10.0, 20.0, 30.0, 40.0]),
            memory: Some(MemoryReading {
                total: 8_000,
                used: 2_000,
                available: 6_000,
                used_percent: 25.0,
            }),
            load: Some(LoadReading {
                one: 0.5,
                five: 0.25,
                fifteen: 0.1,
            }),
            temperatures: Some(vec![SensorReading {
                key: "cpu_thermal".into(),
                celsius: 48.3,
            }]),
            partitions: Some(vec![partition("/dev/sda1", "/", "ext4")]),
            usage: HashMap::from([("/".to_string(), usage(1_000, 400, 600))]),
            io_counters: Some(vec![counter("eth0", 100, 200)]),
            interfaces: Some(vec![iface("eth0", &["192.168.1.10/24"], &["up"])]),
            ..Default::default()
        }
    }
}

impl HostMetricsSource for FakeHost {
    fn hostname(&self) -> Result<String, SourceError> {
        read(&self.hostname, "hostname")
    }

    fn host_info(&self) -> Result<HostInfo, SourceError> {
        read(&self.host_info, "host_info")
    }

    fn cpu_info(&self) -> Result<CpuInfo, SourceError> {
        read(&self.cpu_info, "cpu_info")
    }

    fn cpu_percent(&self, interval: Duration) -> Result<Vec<f64>, SourceError> {
        self.sampled_intervals.lock().unwrap().push(interval);
        if self.panic_on_cpu_sample {
            panic!("cpu sampler crashed");
        }
        read(&self.cpu_percent, "cpu_percent")
    }

    fn virtual_memory(&self) -> Result<MemoryReading, SourceError> {
        read(&self.memory, "memory")
    }

    fn load_average(&self) -> Result<LoadReading, SourceError> {
        read(&self.load, "load")
    }

    fn temperatures(&self) -> Result<Vec<SensorReading>, SourceError> {
        read(&self.temperatures, "temperatures")
    }

    fn partitions(&self) -> Result<Vec<PartitionEntry>, SourceError> {
        read(&self.partitions, "partitions")
    }

    fn disk_usage(&self, mount_point: &str) -> Result<DiskUsage, SourceError> {
        self.usage_calls.lock().unwrap().push(mount_point.to_string());
        self.usage
            .get(mount_point)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(mount_point.to_string()))
    }

    fn io_counters(&self) -> Result<Vec<IoCounter>, SourceError> {
        read(&self.io_counters, "io_counters")
    }

    fn interfaces(&self) -> Result<Vec<InterfaceEntry>, SourceError> {
        read(&self.interfaces, "interfaces")
    }
}

pub fn partition(device: &str, mount_point: &str, fs_type: &str) -> PartitionEntry {
    PartitionEntry {
        device: device.into(),
        mount_point: mount_point.into(),
        fs_type: fs_type.into(),
    }
}

pub fn usage(total: u64, used: u64, free: u64) -> DiskUsage {
    DiskUsage {
        total,
        used,
        free,
        used_percent: if total > 0 {
            used as f64 / total as f64 * 100.0
        } else {
            0.0
        },
    }
}

pub fn counter(name: &str, bytes_sent: u64, bytes_recv: u64) -> IoCounter {
    IoCounter {
        name: name.into(),
        bytes_sent,
        bytes_recv,
        packets_sent: bytes_sent / 10,
        packets_recv: bytes_recv / 10,
    }
}

pub fn iface(name: &str, addresses: &[&str], flags: &[&str]) -> InterfaceEntry {
    InterfaceEntry {
        name: name.into(),
        addresses: addresses.iter().map(|a| a.to_string()).collect(),
        flags: flags.iter().map(|f| f.to_string()).collect(),
    }
}

/// Fake engine: `reachable = false` fails connect; `None` fields fail their call;
/// every call sleeps `delay` first.
#[derive(Clone, Default)]
pub struct FakeEngine {
    pub reachable: bool,
    pub version: Option<String>,
    pub containers: Option<Vec<EngineContainer>>,
    pub stats: Option<ContainerStatsResponse>,
    pub delay: Duration,
}

impl FakeEngine {
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_containers(containers: Vec<EngineContainer>) -> Self {
        Self {
            reachable: true,
            version: Some("27.3.1".into()),
            containers: Some(containers),
            ..Default::default()
        }
    }
}

impl ContainerEngine for FakeEngine {
    fn connect(&self) -> Result<Box<dyn ContainerEngineClient>, EngineError> {
        if !self.reachable {
            return Err(EngineError::Connect("no socket".into()));
        }
        Ok(Box::new(self.clone()))
    }
}

impl ContainerEngineClient for FakeEngine {
    fn server_version(&self) -> BoxFuture<'_, Result<String, EngineError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.version
                .clone()
                .ok_or_else(|| EngineError::Request("version".into()))
        })
    }

    fn list_all_containers(&self) -> BoxFuture<'_, Result<Vec<EngineContainer>, EngineError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.containers
                .clone()
                .ok_or_else(|| EngineError::Request("list".into()))
        })
    }

    fn container_stats<'a>(
        &'a self,
        _id: &'a str,
    ) -> BoxFuture<'a, Result<ContainerStatsResponse, EngineError>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.stats
                .clone()
                .ok_or_else(|| EngineError::Decode("unexpected EOF".into()))
        })
    }
}

pub fn container(id: &str, name: &str, state: &str) -> EngineContainer {
    EngineContainer {
        id: id.into(),
        names: vec![name.into()],
        image: "nginx:alpine".into(),
        state: state.into(),
        status: if state == "running" {
            "Up 3 hours".into()
        } else {
            "Exited (0) 2 days ago".into()
        },
        created: 1_700_000_000,
        ports: vec![PortInfo {
            private_port: 80,
            public_port: 8081,
            type_: "tcp".into(),
        }],
        labels: HashMap::from([("com.example.stack".to_string(), "web".to_string())]),
    }
}
