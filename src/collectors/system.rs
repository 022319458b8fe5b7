// SystemCollector: host identity, CPU, memory, load average, temperatures

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use super::{humanize_uptime, reading};
use crate::models::{LoadSnapshot, MemorySnapshot, SystemSnapshot, TemperatureReading};
use crate::sources::HostMetricsSource;

#[derive(Clone)]
pub struct SystemCollector {
    source: Arc<dyn HostMetricsSource>,
    sample_interval: Duration,
}

impl SystemCollector {
    /// `sample_interval` is the CPU usage measurement window; `collect` blocks for it.
    pub fn new(source: Arc<dyn HostMetricsSource>, sample_interval: Duration) -> Self {
        Self {
            source,
            sample_interval,
        }
    }

    /// Snapshot with only the build architecture filled; every reading failed.
    pub fn baseline() -> SystemSnapshot {
        SystemSnapshot {
            arch: std::env::consts::ARCH.to_string(),
            ..Default::default()
        }
    }

    #[instrument(skip(self), fields(collector = "system"))]
    pub fn collect(&self) -> SystemSnapshot {
        let mut snapshot = Self::baseline();

        if let Some(hostname) = reading("hostname", self.source.hostname()) {
            snapshot.hostname = hostname;
        }

        if let Some(host) = reading("host_info", self.source.host_info()) {
            snapshot.platform = host.platform;
            snapshot.os = host.os;
            snapshot.uptime = host.uptime_secs;
            snapshot.uptime_human = humanize_uptime(host.uptime_secs);
        }

        if let Some(info) = reading("cpu_info", self.source.cpu_info()) {
            snapshot.cpu.model = info.model;
            snapshot.cpu.cores = info.logical_cores;
        }

        if let Some(per_core) = reading("cpu_percent", self.source.cpu_percent(self.sample_interval))
        {
            snapshot.cpu.total_usage = mean_usage(&per_core);
            snapshot.cpu.usage_percent = per_core;
        }

        if let Some(mem) = reading("virtual_memory", self.source.virtual_memory()) {
            snapshot.memory = MemorySnapshot {
                total: mem.total,
                used: mem.used,
                available: mem.available,
                used_percent: mem.used_percent,
            };
        }

        if let Some(load) = reading("load_average", self.source.load_average()) {
            snapshot.load = LoadSnapshot {
                load1: load.one,
                load5: load.five,
                load15: load.fifteen,
            };
        }

        if let Some(sensors) = reading("temperatures", self.source.temperatures()) {
            snapshot.temperature = sensors
                .into_iter()
                .filter(|s| s.celsius > 0.0)
                .map(|s| TemperatureReading {
                    sensor_key: s.key,
                    temperature: s.celsius,
                })
                .collect();
        }

        snapshot
    }
}

/// Arithmetic mean of per-core percentages; 0 for no cores.
pub fn mean_usage(per_core: &[f64]) -> f64 {
    if per_core.is_empty() {
        return 0.0;
    }
    per_core.iter().sum::<f64>() / per_core.len() as f64
}
