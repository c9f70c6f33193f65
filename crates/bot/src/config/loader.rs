use std::path::Path;

use super::schema::BotConfig;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Validation(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

pub fn load_from_file(path: &Path) -> Result<BotConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<BotConfig, LoadError> {
    let cfg: BotConfig = serde_yaml::from_str(yaml)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &BotConfig) -> Result<(), LoadError> {
    if cfg.check_interval_seconds == 0 {
        return Err(LoadError::Validation(
            "check_interval_seconds must be > 0".into(),
        ));
    }
    if cfg.daily_summary.hour > 23 {
        return Err(LoadError::Validation(
            "daily_summary.hour must be 0..=23".into(),
        ));
    }
    if cfg.daily_summary.minute > 59 {
        return Err(LoadError::Validation(
            "daily_summary.minute must be 0..=59".into(),
        ));
    }
    for (name, value) in [
        ("cpu", cfg.thresholds.cpu),
        ("ram", cfg.thresholds.ram),
        ("disk", cfg.thresholds.disk),
    ] {
        if !(value > 0.0 && value <= 100.0) {
            return Err(LoadError::Validation(format!(
                "thresholds.{name} must be in (0, 100], got {value}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config() {
        let cfg = load_from_str("check_interval_seconds: 90\n").unwrap();
        assert_eq!(cfg.check_interval_seconds, 90);
    }

    #[test]
    fn zero_interval_rejected() {
        let err = load_from_str("check_interval_seconds: 0\n").unwrap_err();
        assert!(err.to_string().contains("check_interval_seconds"));
    }

    #[test]
    fn bad_hour_rejected() {
        let err = load_from_str("daily_summary:\n  hour: 24\n").unwrap_err();
        assert!(err.to_string().contains("hour"));
    }

    #[test]
    fn bad_threshold_rejected() {
        let err = load_from_str("thresholds:\n  cpu: 0\n").unwrap_err();
        assert!(err.to_string().contains("thresholds.cpu"));

        let err = load_from_str("thresholds:\n  disk: 150\n").unwrap_err();
        assert!(err.to_string().contains("thresholds.disk"));
    }

    #[test]
    fn load_from_file_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostwatch.yml");
        std::fs::write(&path, "check_interval_seconds: 30\nthresholds:\n  cpu: 75\n").unwrap();

        let cfg = load_from_file(&path).unwrap();
        assert_eq!(cfg.check_interval_seconds, 30);
        assert_eq!(cfg.thresholds.cpu, 75.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_from_file(Path::new("/nonexistent/hostwatch.yml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
