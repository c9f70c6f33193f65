use hostwatch_engine::{ContainerStatus, SystemSnapshot};

/// Point-in-time readings from the monitored host. Pure query, no retry or
/// smoothing; a failed read costs one evaluation cycle.
#[async_trait::async_trait]
pub trait MetricsSource: Send + Sync {
    async fn system_snapshot(&self) -> Result<SystemSnapshot, SourceError>;
    async fn container_statuses(&self) -> Result<Vec<ContainerStatus>, SourceError>;
}

#[derive(Debug)]
pub struct SourceError(pub String);

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "metrics source: {}", self.0)
    }
}

impl std::error::Error for SourceError {}
