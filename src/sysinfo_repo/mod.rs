// Host metrics via sysinfo (plus Linux /proc, /sys and statvfs helpers)

mod linux;

use std::time::Duration;
use sysinfo::{Components, CpuRefreshKind, Disks, Networks, RefreshKind, System};
use tracing::instrument;

use crate::error::SourceError;
use crate::sources::{
    CpuInfo, DiskUsage, HostInfo, HostMetricsSource, InterfaceEntry, IoCounter, LoadReading,
    MemoryReading, PartitionEntry, SensorReading,
};

/// Stateless: every read builds its own sysinfo handles, so nothing is shared between requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoRepo;

impl SysinfoRepo {
    pub fn new() -> Self {
        Self
    }
}

fn cpu_system() -> System {
    System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()))
}

impl HostMetricsSource for SysinfoRepo {
    fn hostname(&self) -> Result<String, SourceError> {
        System::host_name().ok_or_else(|| SourceError::NotFound("hostname".into()))
    }

    fn host_info(&self) -> Result<HostInfo, SourceError> {
        Ok(HostInfo {
            platform: System::distribution_id(),
            os: std::env::consts::OS.to_string(),
            uptime_secs: System::uptime(),
        })
    }

    fn cpu_info(&self) -> Result<CpuInfo, SourceError> {
        let sys = cpu_system();
        if sys.cpus().is_empty() {
            return Err(SourceError::Unavailable("no cpus reported".into()));
        }
        let model = linux::read_cpu_model_linux()
            .or_else(|| {
                sys.cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_default();
        Ok(CpuInfo {
            model,
            logical_cores: sys.cpus().len() as u32,
        })
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_percent"))]
    fn cpu_percent(&self, interval: Duration) -> Result<Vec<f64>, SourceError> {
        let mut sys = cpu_system();
        sys.refresh_cpu_usage();
        // sysinfo needs at least this long between refreshes to compute a delta.
        std::thread::sleep(interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu_usage();
        if sys.cpus().is_empty() {
            return Err(SourceError::Unavailable("no cpus reported".into()));
        }
        Ok(sys
            .cpus()
            .iter()
            .map(|c| (c.cpu_usage() as f64).clamp(0.0, 100.0))
            .collect())
    }

    fn virtual_memory(&self) -> Result<MemoryReading, SourceError> {
        let mut sys = System::new();
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(SourceError::Unavailable("memory totals not reported".into()));
        }
        let used = sys.used_memory();
        Ok(MemoryReading {
            total,
            used,
            available: sys.available_memory(),
            used_percent: (used as f64 / total as f64) * 100.0,
        })
    }

    fn load_average(&self) -> Result<LoadReading, SourceError> {
        let load = System::load_average();
        Ok(LoadReading {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }

    fn temperatures(&self) -> Result<Vec<SensorReading>, SourceError> {
        let components = Components::new_with_refreshed_list();
        Ok(components
            .list()
            .iter()
            .filter_map(|c| {
                c.temperature().map(|t| SensorReading {
                    key: c.label().to_string(),
                    celsius: t as f64,
                })
            })
            .collect())
    }

    fn partitions(&self) -> Result<Vec<PartitionEntry>, SourceError> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disks
            .list()
            .iter()
            .map(|d| PartitionEntry {
                device: d.name().to_string_lossy().into_owned(),
                mount_point: d.mount_point().to_string_lossy().into_owned(),
                fs_type: d.file_system().to_string_lossy().into_owned(),
            })
            .collect())
    }

    fn disk_usage(&self, mount_point: &str) -> Result<DiskUsage, SourceError> {
        linux::statvfs_usage(mount_point)
    }

    fn io_counters(&self) -> Result<Vec<IoCounter>, SourceError> {
        let networks = Networks::new_with_refreshed_list();
        let mut counters: Vec<IoCounter> = networks
            .list()
            .iter()
            .map(|(name, data)| IoCounter {
                name: name.clone(),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
                packets_sent: data.total_packets_transmitted(),
                packets_recv: data.total_packets_received(),
            })
            .collect();
        counters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counters)
    }

    fn interfaces(&self) -> Result<Vec<InterfaceEntry>, SourceError> {
        let networks = Networks::new_with_refreshed_list();
        let mut entries: Vec<InterfaceEntry> = networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceEntry {
                name: name.clone(),
                addresses: data
                    .ip_networks()
                    .iter()
                    .map(|n| format!("{}/{}", n.addr, n.prefix))
                    .collect(),
                flags: linux::interface_flags(name),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
