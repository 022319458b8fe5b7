// Docker engine access via bollard

pub(crate) mod stats;

use bollard::Docker;
use bollard::errors::Error as BollardError;
use bollard::query_parameters::{ListContainersOptions, StatsOptions};
use bollard::models::{ContainerStatsResponse, ContainerSummary};
use futures_util::StreamExt;
use futures_util::future::BoxFuture;

use crate::error::EngineError;
use crate::models::PortInfo;
use crate::sources::{ContainerEngine, ContainerEngineClient, EngineContainer};

/// Connects with the standard Docker environment (DOCKER_HOST, else the local socket).
#[derive(Debug, Default, Clone, Copy)]
pub struct DockerRepo;

impl DockerRepo {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerEngine for DockerRepo {
    fn connect(&self) -> Result<Box<dyn ContainerEngineClient>, EngineError> {
        let docker =
            Docker::connect_with_defaults().map_err(|e| EngineError::Connect(e.to_string()))?;
        Ok(Box::new(DockerClient { docker }))
    }
}

pub struct DockerClient {
    docker: Docker,
}

impl ContainerEngineClient for DockerClient {
    fn server_version(&self) -> BoxFuture<'_, Result<String, EngineError>> {
        Box::pin(async move {
            let version = self.docker.version().await.map_err(request_error)?;
            Ok(version.version.unwrap_or_default())
        })
    }

    fn list_all_containers(&self) -> BoxFuture<'_, Result<Vec<EngineContainer>, EngineError>> {
        Box::pin(async move {
            let options = ListContainersOptions {
                all: true,
                ..Default::default()
            };
            let containers = self
                .docker
                .list_containers(Some(options))
                .await
                .map_err(request_error)?;
            Ok(containers.into_iter().map(to_engine_container).collect())
        })
    }

    fn container_stats<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<ContainerStatsResponse, EngineError>> {
        Box::pin(async move {
            let options = StatsOptions {
                stream: false,
                ..Default::default()
            };
            let mut stream = self.docker.stats(id, Some(options));
            match stream.next().await {
                Some(result) => result.map_err(request_error),
                None => Err(EngineError::Request(format!(
                    "engine closed the stats stream for container {}",
                    id
                ))),
            }
        })
    }
}

fn request_error(e: BollardError) -> EngineError {
    match e {
        BollardError::JsonDataError { .. } | BollardError::JsonSerdeError { .. } => {
            EngineError::Decode(e.to_string())
        }
        other => EngineError::Request(other.to_string()),
    }
}

fn to_engine_container(c: ContainerSummary) -> EngineContainer {
    let ports = c
        .ports
        .unwrap_or_default()
        .into_iter()
        .map(|p| PortInfo {
            private_port: p.private_port,
            public_port: p.public_port.unwrap_or(0),
            type_: p.typ.map(|t| t.to_string()).unwrap_or_default(),
        })
        .collect();
    EngineContainer {
        id: c.id.unwrap_or_default(),
        names: c.names.unwrap_or_default(),
        image: c.image.unwrap_or_default(),
        state: c.state.map(|s| s.to_string()).unwrap_or_default(),
        status: c.status.unwrap_or_default(),
        created: c.created.unwrap_or_default(),
        ports,
        labels: c.labels.unwrap_or_default(),
    }
}
