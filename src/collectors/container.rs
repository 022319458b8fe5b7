// ContainerCollector: engine availability, container listing and run-state counts

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::docker_repo::stats;
use crate::error::EngineError;
use crate::models::{ContainerInfo, ContainerSnapshot, ContainerStatsDetail};
use crate::sources::{ContainerEngine, EngineContainer};

/// Length of the short container ID shown on the dashboard.
pub const SHORT_ID_LEN: usize = 12;

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// First reported name with one leading '/' removed; empty when the engine reports none.
pub fn display_name(names: &[String]) -> String {
    names
        .first()
        .map(|n| n.strip_prefix('/').unwrap_or(n).to_string())
        .unwrap_or_default()
}

fn normalize(c: EngineContainer) -> ContainerInfo {
    ContainerInfo {
        id: short_id(&c.id),
        name: display_name(&c.names),
        image: c.image,
        state: c.state,
        status: c.status,
        created: c.created,
        ports: c.ports,
        labels: c.labels,
    }
}

/// Runs `fut` against a shared deadline; expiry becomes `EngineError::Timeout(budget)`.
async fn before<T>(
    deadline: Instant,
    budget: Duration,
    fut: impl Future<Output = Result<T, EngineError>>,
) -> Result<T, EngineError> {
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| EngineError::Timeout(budget))?
}

#[derive(Clone)]
pub struct ContainerCollector {
    engine: Arc<dyn ContainerEngine>,
    snapshot_timeout: Duration,
    stats_timeout: Duration,
}

impl ContainerCollector {
    pub fn new(
        engine: Arc<dyn ContainerEngine>,
        snapshot_timeout: Duration,
        stats_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            snapshot_timeout,
            stats_timeout,
        }
    }

    #[instrument(skip(self), fields(collector = "docker"))]
    pub async fn collect(&self) -> ContainerSnapshot {
        let client = match self.engine.connect() {
            Ok(c) => c,
            Err(e) => {
                debug!(error = %e, "container engine not reachable");
                return ContainerSnapshot::default();
            }
        };

        let deadline = Instant::now() + self.snapshot_timeout;
        let version = match before(deadline, self.snapshot_timeout, client.server_version()).await
        {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "container engine version query failed");
                return ContainerSnapshot::default();
            }
        };

        let listed =
            match before(deadline, self.snapshot_timeout, client.list_all_containers()).await {
                Ok(list) => list,
                Err(e) if e.is_timeout() => {
                    warn!(error = %e, "container listing exceeded budget");
                    return ContainerSnapshot::default();
                }
                Err(e) => {
                    warn!(error = %e, "container listing failed");
                    return ContainerSnapshot {
                        available: true,
                        version,
                        ..Default::default()
                    };
                }
            };

        let containers: Vec<ContainerInfo> = listed.into_iter().map(normalize).collect();
        let running_count = containers.iter().filter(|c| c.state == "running").count();

        ContainerSnapshot {
            available: true,
            version,
            total_count: containers.len(),
            running_count,
            stopped_count: containers.len() - running_count,
            containers,
        }
    }

    /// One live stats reading for a container, bounded by the stats budget.
    /// Fails only when the engine is unreachable, errors, times out or sends
    /// an undecodable document.
    #[instrument(skip(self), fields(collector = "docker", operation = "container_stats"))]
    pub async fn container_stats(&self, id: &str) -> Result<ContainerStatsDetail, EngineError> {
        let deadline = Instant::now() + self.stats_timeout;
        let client = self.engine.connect()?;
        let raw = before(deadline, self.stats_timeout, client.container_stats(id)).await?;
        let name = raw
            .name
            .as_deref()
            .map(|n| n.strip_prefix('/').unwrap_or(n).to_string())
            .unwrap_or_default();
        let summary = stats::process_statistics(&raw, &short_id(id), &name);
        Ok(ContainerStatsDetail {
            snapshot: raw,
            summary,
        })
    }
}
