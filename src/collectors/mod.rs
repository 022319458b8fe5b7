// Per-subsystem collectors. Each one turns raw source readings into a snapshot
// and never fails: unreadable parts degrade to zero values / empty lists.

mod container;
mod network;
mod storage;
mod system;
mod uptime;

pub use container::{ContainerCollector, SHORT_ID_LEN, display_name, short_id};
pub use network::{
    NetworkCollector, VIRTUAL_INTERFACE_PREFIXES, has_traffic, is_displayable_address,
    is_virtual_interface,
};
pub use storage::{StorageCollector, VIRTUAL_FS_TYPES, has_capacity, is_virtual_fs};
pub use system::{SystemCollector, mean_usage};
pub use uptime::humanize_uptime;

use crate::error::SourceError;

/// Value-or-absent for one sub-reading; logs what was dropped.
fn reading<T>(what: &'static str, result: Result<T, SourceError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(reading = what, error = %e, "sub-reading unavailable");
            None
        }
    }
}
