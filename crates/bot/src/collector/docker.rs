use bollard::container::ListContainersOptions;
use bollard::Docker;
use hostwatch_engine::ContainerStatus;

use super::traits::SourceError;

/// Enumerates containers (including stopped ones) through the local Docker
/// daemon.
pub struct DockerProbe {
    docker: Docker,
}

impl DockerProbe {
    pub fn connect() -> Result<Self, SourceError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| SourceError(e.to_string()))?;
        Ok(Self { docker })
    }

    pub async fn statuses(&self) -> Result<Vec<ContainerStatus>, SourceError> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|e| SourceError(e.to_string()))?;

        Ok(summaries
            .into_iter()
            .map(|c| {
                let name = c
                    .names
                    .and_then(|names| names.into_iter().next())
                    .map(|n| n.trim_start_matches('/').to_string())
                    .or(c.id)
                    .unwrap_or_else(|| "unknown".into());
                let status = c.state.unwrap_or_else(|| "unknown".into());
                ContainerStatus { name, status }
            })
            .collect())
    }
}
