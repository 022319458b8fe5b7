// Snapshot models returned by the JSON API (camelCase on the wire)

mod container;
mod network;
mod storage;
mod system;

pub use container::{
    ContainerInfo, ContainerSnapshot, ContainerStatsDetail, ContainerStatsSummary, PortInfo,
};
pub use network::{InterfaceInfo, NetworkSnapshot};
pub use storage::{PartitionInfo, StorageSnapshot};
pub use system::{CpuSnapshot, LoadSnapshot, MemorySnapshot, SystemSnapshot, TemperatureReading};
