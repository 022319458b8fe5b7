// Derive summary figures from one raw Docker stats response.

use crate::models::ContainerStatsSummary;
use bollard::models::{ContainerCpuStats, ContainerStatsResponse};

fn total_usage(c: Option<&ContainerCpuStats>) -> i64 {
    c.and_then(|c| c.cpu_usage.as_ref())
        .and_then(|u| u.total_usage)
        .unwrap_or(0) as i64
}

fn system_usage(c: Option<&ContainerCpuStats>) -> i64 {
    c.and_then(|c| c.system_cpu_usage).unwrap_or(0) as i64
}

/// Missing sections count as zero; a first sample without precpu gives 0% CPU.
pub(crate) fn process_statistics(
    s: &ContainerStatsResponse,
    id: &str,
    name: &str,
) -> ContainerStatsSummary {
    let cpu_stats = s.cpu_stats.as_ref();
    let precpu_stats = s.precpu_stats.as_ref();

    let online_cpus = cpu_stats.and_then(|c| c.online_cpus).unwrap_or(1);
    let cpu_percent = match (cpu_stats, precpu_stats) {
        (Some(_), Some(_)) => {
            let cpu_delta = total_usage(cpu_stats) - total_usage(precpu_stats);
            let system_delta = system_usage(cpu_stats) - system_usage(precpu_stats);
            if system_delta > 0 && online_cpus > 0 {
                (cpu_delta as f64 / system_delta as f64) * online_cpus as f64 * 100.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    let memory = s.memory_stats.as_ref();
    let memory_usage_bytes = memory.and_then(|m| m.usage).unwrap_or(0);
    let memory_limit_bytes = memory.and_then(|m| m.limit).unwrap_or(0);
    let memory_max_usage_bytes = memory.and_then(|m| m.max_usage).unwrap_or(0);

    let (network_rx_bytes, network_tx_bytes) = s.networks.as_ref().map_or((0, 0), |n| {
        n.values().fold((0u64, 0u64), |(rx, tx), v| {
            (rx + v.rx_bytes.unwrap_or(0), tx + v.tx_bytes.unwrap_or(0))
        })
    });

    let (block_read_bytes, block_write_bytes) = s
        .blkio_stats
        .as_ref()
        .and_then(|b| b.io_service_bytes_recursive.as_ref())
        .map_or((0u64, 0u64), |entries| {
            let mut read = 0u64;
            let mut write = 0u64;
            for e in entries {
                match e.op.as_deref() {
                    Some(op) if op.eq_ignore_ascii_case("read") => read += e.value.unwrap_or(0),
                    Some(op) if op.eq_ignore_ascii_case("write") => write += e.value.unwrap_or(0),
                    _ => {}
                }
            }
            (read, write)
        });

    let pids = s.pids_stats.as_ref().and_then(|p| p.current).unwrap_or(0);
    let cpu_throttled = cpu_stats
        .and_then(|c| c.throttling_data.as_ref())
        .is_some_and(|t| t.throttled_periods.unwrap_or(0) > 0);

    ContainerStatsSummary {
        id: id.to_string(),
        name: name.to_string(),
        cpu_percent,
        online_cpus,
        memory_usage_bytes,
        memory_limit_bytes,
        memory_max_usage_bytes,
        network_rx_bytes,
        network_tx_bytes,
        block_read_bytes,
        block_write_bytes,
        pids,
        cpu_throttled,
    }
}
