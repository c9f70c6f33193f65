use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, SubsecRound, Utc};

use super::event::{HistoryRecord, OpenAlert};

/// Owns the set of currently open alerts and the append-only history log.
///
/// A single mutex guards both so every operation observes map and log in one
/// consistent snapshot, which is what keeps "at most one open alert per key"
/// true under concurrent checks and interactive queries. Operations take the
/// evaluation instant explicitly; production callers pass `Utc::now()`.
pub struct AlertStore {
    inner: Mutex<Inner>,
}

struct Inner {
    active: HashMap<String, OpenAlert>,
    history: Vec<HistoryRecord>,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                active: HashMap::new(),
                history: Vec::new(),
            }),
        }
    }

    /// Opens an alert for `key`, returning the message to deliver. Returns
    /// `None` when the key is already open: the condition is still active
    /// and the earlier notification stands.
    pub fn open(&self, key: &str, message: &str, now: DateTime<Utc>) -> Option<String> {
        let now = now.trunc_subsecs(0);
        let mut inner = self.lock();
        if inner.active.contains_key(key) {
            return None;
        }
        inner.active.insert(
            key.to_string(),
            OpenAlert {
                key: key.to_string(),
                message: message.to_string(),
                started_at: now,
            },
        );
        inner.history.push(HistoryRecord {
            key: key.to_string(),
            message: message.to_string(),
            started_at: now,
            resolved_at: None,
        });
        Some(message.to_string())
    }

    /// Closes the alert for `key`, returning a resolution summary with the
    /// original message and how long the alert was active. `None` when the
    /// key is not open, so a second close in a row is a no-op.
    pub fn close(&self, key: &str, now: DateTime<Utc>) -> Option<String> {
        let now = now.trunc_subsecs(0);
        let mut inner = self.lock();
        let alert = inner.active.remove(key)?;

        match inner
            .history
            .iter_mut()
            .rev()
            .find(|r| r.key == key && r.resolved_at.is_none())
        {
            Some(record) => record.resolved_at = Some(now),
            None => {
                tracing::warn!(key, "open alert had no unresolved history record");
            }
        }

        let duration = now - alert.started_at;
        Some(format!(
            "Resolved: {} (active for {})",
            alert.message,
            format_duration(duration)
        ))
    }

    pub fn active(&self) -> HashMap<String, OpenAlert> {
        self.lock().active.clone()
    }

    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Records with `started_at >= now - window`, insertion order, resolved
    /// or not.
    pub fn history_since(&self, window: Duration, now: DateTime<Utc>) -> Vec<HistoryRecord> {
        let cutoff = now - window;
        self.lock()
            .history
            .iter()
            .filter(|r| r.started_at >= cutoff)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-update elsewhere; the data is
        // still structurally valid, so keep serving.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}
