// NetworkCollector: physical interfaces with traffic, joined with addresses and up state

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::models::{InterfaceInfo, NetworkSnapshot};
use crate::sources::{HostMetricsSource, IoCounter};

/// Interface name prefixes for loopback, container bridges and virtual links.
pub const VIRTUAL_INTERFACE_PREFIXES: &[&str] = &["lo", "docker", "br-", "veth", "virbr", "vnet"];

pub fn is_virtual_interface(name: &str) -> bool {
    VIRTUAL_INTERFACE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

pub fn has_traffic(counter: &IoCounter) -> bool {
    counter.bytes_sent != 0 || counter.bytes_recv != 0
}

/// Drops IPv6 link-local (fe80:) and loopback (::1).
pub fn is_displayable_address(addr: &str) -> bool {
    !addr.starts_with("fe80:") && !addr.starts_with("::1")
}

#[derive(Clone)]
pub struct NetworkCollector {
    source: Arc<dyn HostMetricsSource>,
}

impl NetworkCollector {
    pub fn new(source: Arc<dyn HostMetricsSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self), fields(collector = "network"))]
    pub fn collect(&self) -> NetworkSnapshot {
        let counters = match self.source.io_counters() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "interface counters unavailable");
                return NetworkSnapshot::default();
            }
        };
        let interfaces = match self.source.interfaces() {
            Ok(i) => i,
            Err(e) => {
                warn!(error = %e, "interface metadata unavailable");
                return NetworkSnapshot::default();
            }
        };

        let mut addresses_by_name: HashMap<String, Vec<String>> = HashMap::new();
        let mut up: HashSet<String> = HashSet::new();
        for iface in interfaces {
            if iface.flags.iter().any(|f| f == "up") {
                up.insert(iface.name.clone());
            }
            let addrs = iface
                .addresses
                .into_iter()
                .filter(|a| is_displayable_address(a))
                .collect();
            addresses_by_name.insert(iface.name, addrs);
        }

        counters
            .into_iter()
            .filter(|c| !is_virtual_interface(&c.name))
            .filter(has_traffic)
            .fold(NetworkSnapshot::default(), |mut acc, c| {
                acc.total_sent += c.bytes_sent;
                acc.total_recv += c.bytes_recv;
                acc.interfaces.push(InterfaceInfo {
                    addresses: addresses_by_name.get(&c.name).cloned().unwrap_or_default(),
                    is_up: up.contains(&c.name),
                    name: c.name,
                    bytes_sent: c.bytes_sent,
                    bytes_recv: c.bytes_recv,
                    packets_sent: c.packets_sent,
                    packets_recv: c.packets_recv,
                });
                acc
            })
    }
}
