use hostwatch_engine::Thresholds;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BotConfig {
    #[serde(default = "default_interval")]
    pub check_interval_seconds: u64,
    #[serde(default)]
    pub daily_summary: DailySummaryConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Time of day (UTC) at which the daily summary is delivered.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct DailySummaryConfig {
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: default_interval(),
            daily_summary: DailySummaryConfig::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for DailySummaryConfig {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
        }
    }
}

fn default_interval() -> u64 {
    120
}

fn default_hour() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let yaml = r#"
check_interval_seconds: 60
daily_summary:
  hour: 8
  minute: 30
thresholds:
  cpu: 70.0
  ram: 80.0
  disk: 90.0
"#;
        let cfg: BotConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.check_interval_seconds, 60);
        assert_eq!(cfg.daily_summary.hour, 8);
        assert_eq!(cfg.daily_summary.minute, 30);
        assert_eq!(cfg.thresholds.cpu, 70.0);
    }

    #[test]
    fn defaults_applied() {
        let cfg: BotConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.check_interval_seconds, 120);
        assert_eq!(cfg.daily_summary.hour, 10);
        assert_eq!(cfg.daily_summary.minute, 0);
        assert_eq!(cfg.thresholds.cpu, 80.0);
        assert_eq!(cfg.thresholds.ram, 85.0);
        assert_eq!(cfg.thresholds.disk, 85.0);
    }
}
