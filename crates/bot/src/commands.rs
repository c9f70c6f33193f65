use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hostwatch_engine::{ContainerStatus, OpenAlert, SystemSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ServerStatus,
    DockerStatus,
    Alerts,
}

impl Command {
    /// Parses the leading token of a message, ignoring a `@botname` suffix
    /// and anything after the command. Unknown text maps to `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.split('@').next().unwrap_or(first);
        match name {
            "/serverstatus" => Some(Self::ServerStatus),
            "/dockerstatus" => Some(Self::DockerStatus),
            "/alerts" => Some(Self::Alerts),
            _ => None,
        }
    }
}

pub fn render_status(snapshot: &SystemSnapshot, active_alerts: usize) -> String {
    format!(
        "Server status\n\n\
         CPU: {:.1}%\n\
         RAM: {:.1}%\n\
         Disk: {:.1}%\n\
         Load: {:.2}\n\n\
         Active alerts: {active_alerts}",
        snapshot.cpu, snapshot.ram, snapshot.disk, snapshot.load
    )
}

pub fn render_containers(containers: &[ContainerStatus]) -> String {
    let running = containers.iter().filter(|c| c.is_running()).count();
    let mut out = format!("Containers running: {running}/{}\n\n", containers.len());
    for c in containers {
        out.push_str(&format!("{} -> {}\n", c.name, c.status));
    }
    out
}

pub fn render_alerts(active: &HashMap<String, OpenAlert>) -> String {
    if active.is_empty() {
        return "No active alerts.".into();
    }

    let mut alerts: Vec<&OpenAlert> = active.values().collect();
    alerts.sort_by_key(|a| (a.started_at, a.key.clone()));

    let mut out = String::from("Active alerts:\n\n");
    for alert in alerts {
        out.push_str(&format!(
            "{}\nSince: {}\n\n",
            alert.message,
            alert.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    out
}

pub fn render_daily_summary(
    now: DateTime<Utc>,
    snapshot: &SystemSnapshot,
    alerts_last_24h: usize,
) -> String {
    format!(
        "Daily summary ({})\n\n\
         CPU: {:.1}%\n\
         RAM: {:.1}%\n\
         Disk: {:.1}%\n\n\
         Alerts in the last 24h: {alerts_last_24h}",
        now.format("%Y-%m-%d"),
        snapshot.cpu,
        snapshot.ram,
        snapshot.disk
    )
}
