use std::sync::Mutex;

use hostwatch_engine::SystemSnapshot;
use sysinfo::{Disks, System};

use super::traits::SourceError;

/// Reads CPU, memory, and disk utilization through sysinfo. CPU usage needs
/// two refreshes with a pause in between, so the guards are dropped across
/// the sleep.
pub struct SystemProbe {
    sys: Mutex<System>,
    disks: Mutex<Disks>,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
        }
    }

    pub async fn snapshot(&self) -> Result<SystemSnapshot, SourceError> {
        {
            let mut sys = self.lock_sys();
            sys.refresh_cpu_usage();
        }
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;

        let (cpu, ram) = {
            let mut sys = self.lock_sys();
            sys.refresh_cpu_usage();
            sys.refresh_memory();

            let total = sys.total_memory();
            let ram = if total == 0 {
                0.0
            } else {
                sys.used_memory() as f64 / total as f64 * 100.0
            };
            (sys.global_cpu_info().cpu_usage() as f64, ram)
        };

        let disk = self.root_disk_usage()?;
        let load = System::load_average().one;

        Ok(SystemSnapshot { cpu, ram, disk, load })
    }

    fn root_disk_usage(&self) -> Result<f64, SourceError> {
        let mut disks = self
            .disks
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        disks.refresh();

        // Prefer the root mount; fall back to the largest disk on hosts
        // where "/" is not listed (e.g. inside some containers).
        let disk = disks
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"))
            .or_else(|| disks.iter().max_by_key(|d| d.total_space()))
            .ok_or_else(|| SourceError("no disks found".into()))?;

        let total = disk.total_space();
        if total == 0 {
            return Err(SourceError("disk reports zero capacity".into()));
        }
        let used = total - disk.available_space();
        Ok(used as f64 / total as f64 * 100.0)
    }

    fn lock_sys(&self) -> std::sync::MutexGuard<'_, System> {
        self.sys.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_yields_percentages() {
        let probe = SystemProbe::new();
        let snapshot = probe.snapshot().await.expect("host snapshot");

        assert!((0.0..=100.0).contains(&snapshot.cpu));
        assert!((0.0..=100.0).contains(&snapshot.ram));
        assert!((0.0..=100.0).contains(&snapshot.disk));
        assert!(snapshot.load >= 0.0);
    }
}
