// StorageCollector: physical partitions with usage, deduplicated by device

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::models::{PartitionInfo, StorageSnapshot};
use crate::sources::{DiskUsage, HostMetricsSource};

/// Pseudo/virtual filesystem types never shown as storage.
pub const VIRTUAL_FS_TYPES: &[&str] = &[
    "sysfs",
    "proc",
    "devtmpfs",
    "devpts",
    "tmpfs",
    "securityfs",
    "cgroup",
    "cgroup2",
    "pstore",
    "debugfs",
    "hugetlbfs",
    "mqueue",
    "fusectl",
    "configfs",
    "binfmt_misc",
    "overlay",
    "squashfs",
];

pub fn is_virtual_fs(fs_type: &str) -> bool {
    VIRTUAL_FS_TYPES.contains(&fs_type)
}

pub fn has_capacity(usage: &DiskUsage) -> bool {
    usage.total > 0
}

#[derive(Clone)]
pub struct StorageCollector {
    source: Arc<dyn HostMetricsSource>,
}

impl StorageCollector {
    pub fn new(source: Arc<dyn HostMetricsSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self), fields(collector = "storage"))]
    pub fn collect(&self) -> StorageSnapshot {
        let partitions = match self.source.partitions() {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "partition enumeration failed");
                return StorageSnapshot::default();
            }
        };

        let mut seen_devices: HashSet<String> = HashSet::new();
        let mut snapshot = StorageSnapshot::default();

        for partition in partitions {
            if seen_devices.contains(&partition.device) || is_virtual_fs(&partition.fs_type) {
                continue;
            }
            let usage = match self.source.disk_usage(&partition.mount_point) {
                Ok(u) => u,
                Err(e) => {
                    debug!(mount = %partition.mount_point, error = %e, "usage unavailable, skipping");
                    continue;
                }
            };
            if !has_capacity(&usage) {
                continue;
            }

            snapshot.total_size += usage.total;
            snapshot.total_used += usage.used;
            snapshot.total_free += usage.free;
            seen_devices.insert(partition.device.clone());
            snapshot.partitions.push(PartitionInfo {
                device: partition.device,
                mountpoint: partition.mount_point,
                fstype: partition.fs_type,
                total: usage.total,
                used: usage.used,
                free: usage.free,
                used_percent: usage.used_percent,
            });
        }

        snapshot
    }
}
