// Optional DockerRepo tests when Docker daemon is available

use server_nexus::collectors::ContainerCollector;
use server_nexus::docker_repo::DockerRepo;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_docker_repo_snapshot_is_consistent() {
    let collector = ContainerCollector::new(
        Arc::new(DockerRepo::new()),
        Duration::from_secs(10),
        Duration::from_secs(5),
    );
    let snapshot = collector.collect().await;
    if !snapshot.available {
        // Skip when Docker is not available (e.g. CI without Docker)
        return;
    }
    assert_eq!(snapshot.total_count, snapshot.containers.len());
    assert_eq!(
        snapshot.running_count + snapshot.stopped_count,
        snapshot.total_count
    );
    assert!(snapshot.containers.iter().all(|c| c.id.chars().count() <= 12));
}
