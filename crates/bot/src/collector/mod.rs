mod docker;
mod system;
mod traits;

pub use docker::DockerProbe;
pub use system::SystemProbe;
pub use traits::{MetricsSource, SourceError};

use hostwatch_engine::{ContainerStatus, SystemSnapshot};

/// Production metrics source: sysinfo for host utilization, the local
/// Docker daemon for container run status.
pub struct HostSource {
    system: SystemProbe,
    docker: DockerProbe,
}

impl HostSource {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            system: SystemProbe::new(),
            docker: DockerProbe::connect()?,
        })
    }
}

#[async_trait::async_trait]
impl MetricsSource for HostSource {
    async fn system_snapshot(&self) -> Result<SystemSnapshot, SourceError> {
        self.system.snapshot().await
    }

    async fn container_statuses(&self) -> Result<Vec<ContainerStatus>, SourceError> {
        self.docker.statuses().await
    }
}
