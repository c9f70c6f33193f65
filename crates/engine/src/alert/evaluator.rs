use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::rule::ThresholdRule;
use super::store::AlertStore;
use crate::metrics::{ContainerStatus, SystemSnapshot};

pub fn container_key(name: &str) -> String {
    format!("container_{name}")
}

/// Translates one metrics snapshot plus the threshold rules into store
/// transitions. Each key's open/close decision is independent; the returned
/// messages are whatever transitions actually happened this cycle, in rule
/// order then container order.
pub struct Evaluator {
    store: Arc<AlertStore>,
    rules: Vec<ThresholdRule>,
}

impl Evaluator {
    pub fn new(store: Arc<AlertStore>, rules: Vec<ThresholdRule>) -> Self {
        Self { store, rules }
    }

    pub fn evaluate(
        &self,
        snapshot: &SystemSnapshot,
        containers: &[ContainerStatus],
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let mut messages = Vec::new();

        for rule in &self.rules {
            let transition = if rule.exceeded(snapshot) {
                let value = rule.signal.read(snapshot);
                self.store.open(rule.key(), &rule.message(value), now)
            } else {
                self.store.close(rule.key(), now)
            };
            messages.extend(transition);
        }

        let mut seen = HashSet::new();
        for container in containers {
            let key = container_key(&container.name);
            seen.insert(key.clone());

            let transition = if container.is_running() {
                self.store.close(&key, now)
            } else {
                let text = format!("Container {} is {}", container.name, container.status);
                self.store.open(&key, &text, now)
            };
            messages.extend(transition);
        }

        // A container that vanished from the listing can never report
        // "running" again; close its alert instead of leaving it open
        // forever.
        for key in self.store.active().into_keys() {
            if key.starts_with("container_") && !seen.contains(&key) {
                tracing::warn!(key = %key, "container no longer listed, closing alert");
                messages.extend(self.store.close(&key, now));
            }
        }

        messages
    }
}
