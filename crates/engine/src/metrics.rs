use serde::{Deserialize, Serialize};

/// One point-in-time reading of host utilization, all values in percent
/// except `load` (1-minute load average).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub cpu: f64,
    pub ram: f64,
    pub disk: f64,
    pub load: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    pub status: String,
}

impl ContainerStatus {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}
