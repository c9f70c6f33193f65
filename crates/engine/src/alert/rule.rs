use serde::{Deserialize, Serialize};

use crate::metrics::SystemSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Cpu,
    Ram,
    Disk,
}

impl Signal {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu_high",
            Self::Ram => "ram_high",
            Self::Disk => "disk_high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Ram => "RAM",
            Self::Disk => "disk",
        }
    }

    pub fn read(&self, snapshot: &SystemSnapshot) -> f64 {
        match self {
            Self::Cpu => snapshot.cpu,
            Self::Ram => snapshot.ram,
            Self::Disk => snapshot.disk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub signal: Signal,
    pub threshold: f64,
}

impl ThresholdRule {
    pub fn key(&self) -> &'static str {
        self.signal.key()
    }

    /// Strictly greater; a value equal to the threshold does not trigger.
    pub fn exceeded(&self, snapshot: &SystemSnapshot) -> bool {
        self.signal.read(snapshot) > self.threshold
    }

    pub fn message(&self, value: f64) -> String {
        format!("High {} usage: {value:.1}%", self.signal.label())
    }
}

/// The three scalar thresholds, in percent. Adjustable via configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_cpu")]
    pub cpu: f64,
    #[serde(default = "default_ram")]
    pub ram: f64,
    #[serde(default = "default_disk")]
    pub disk: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: default_cpu(),
            ram: default_ram(),
            disk: default_disk(),
        }
    }
}

impl Thresholds {
    pub fn rules(&self) -> Vec<ThresholdRule> {
        vec![
            ThresholdRule { signal: Signal::Cpu, threshold: self.cpu },
            ThresholdRule { signal: Signal::Ram, threshold: self.ram },
            ThresholdRule { signal: Signal::Disk, threshold: self.disk },
        ]
    }
}

fn default_cpu() -> f64 {
    80.0
}

fn default_ram() -> f64 {
    85.0
}

fn default_disk() -> f64 {
    85.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cpu: f64, ram: f64, disk: f64) -> SystemSnapshot {
        SystemSnapshot { cpu, ram, disk, load: 0.0 }
    }

    #[test]
    fn exceeded_strictly_greater() {
        let rule = ThresholdRule { signal: Signal::Cpu, threshold: 80.0 };
        assert!(rule.exceeded(&snapshot(80.1, 0.0, 0.0)));
        assert!(!rule.exceeded(&snapshot(80.0, 0.0, 0.0)));
        assert!(!rule.exceeded(&snapshot(79.9, 0.0, 0.0)));
    }

    #[test]
    fn message_contains_value() {
        let rule = ThresholdRule { signal: Signal::Cpu, threshold: 80.0 };
        let msg = rule.message(92.0);
        assert!(msg.contains("92"));
        assert!(msg.contains("CPU"));
    }

    #[test]
    fn signals_read_their_own_field() {
        let s = snapshot(10.0, 20.0, 30.0);
        assert_eq!(Signal::Cpu.read(&s), 10.0);
        assert_eq!(Signal::Ram.read(&s), 20.0);
        assert_eq!(Signal::Disk.read(&s), 30.0);
    }

    #[test]
    fn default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.cpu, 80.0);
        assert_eq!(t.ram, 85.0);
        assert_eq!(t.disk, 85.0);
        assert_eq!(t.rules().len(), 3);
    }
}
