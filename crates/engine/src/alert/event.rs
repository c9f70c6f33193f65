use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A condition currently judged to be in violation. At most one per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAlert {
    pub key: String,
    pub message: String,
    pub started_at: DateTime<Utc>,
}

/// One open/close lifecycle of an alert key. Appended when the alert opens,
/// stamped with `resolved_at` when it closes, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub key: String,
    pub message: String,
    pub started_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}
