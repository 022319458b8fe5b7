// Platform helpers: /proc/cpuinfo, /sys/class/net flags, statvfs usage.

use crate::error::SourceError;
use crate::sources::DiskUsage;

/// Read first "model name" from /proc/cpuinfo (Linux). Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

const IFF_FLAG_NAMES: &[(u32, &str)] = &[
    (0x1, "up"),
    (0x2, "broadcast"),
    (0x8, "loopback"),
    (0x10, "pointtopoint"),
    (0x1000, "multicast"),
];

/// Decode a kernel interface flag word ("0x1003") into flag names.
pub(super) fn decode_interface_flags(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let bits = u32::from_str_radix(raw.trim_start_matches("0x"), 16).unwrap_or(0);
    IFF_FLAG_NAMES
        .iter()
        .filter(|(bit, _)| bits & bit != 0)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Flags from /sys/class/net/<interface>/flags (Linux); empty elsewhere or when unreadable.
pub(super) fn interface_flags(interface_name: &str) -> Vec<String> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/flags", interface_name);
        if let Ok(content) = std::fs::read_to_string(&path) {
            return decode_interface_flags(&content);
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = interface_name;
    Vec::new()
}

/// total = blocks * frsize, free = bavail * frsize, used = (blocks - bfree) * frsize.
#[cfg(unix)]
pub(super) fn statvfs_usage(mount_point: &str) -> Result<DiskUsage, SourceError> {
    let st = nix::sys::statvfs::statvfs(mount_point).map_err(std::io::Error::from)?;
    let frsize = st.fragment_size() as u64;
    let blocks = st.blocks() as u64;
    let total = blocks * frsize;
    let free = st.blocks_available() as u64 * frsize;
    let used = blocks.saturating_sub(st.blocks_free() as u64) * frsize;
    Ok(usage(total, used, free))
}

#[cfg(not(unix))]
pub(super) fn statvfs_usage(mount_point: &str) -> Result<DiskUsage, SourceError> {
    let disks = sysinfo::Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == std::path::Path::new(mount_point))
        .ok_or_else(|| SourceError::NotFound(format!("mount point {}", mount_point)))?;
    let total = disk.total_space();
    let free = disk.available_space();
    Ok(usage(total, total.saturating_sub(free), free))
}

fn usage(total: u64, used: u64, free: u64) -> DiskUsage {
    let used_percent = if used + free > 0 {
        used as f64 / (used + free) as f64 * 100.0
    } else {
        0.0
    };
    DiskUsage {
        total,
        used,
        free,
        used_percent,
    }
}
