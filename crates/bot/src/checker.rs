use std::sync::Arc;

use chrono::{Duration, Utc};
use hostwatch_engine::{AlertStore, Evaluator};

use crate::collector::MetricsSource;
use crate::commands;
use crate::notifier::Notifier;

/// One evaluation cycle: read the host, drive the store through the
/// evaluator, fan the transition messages out to the chat.
pub struct AlertCycle {
    source: Arc<dyn MetricsSource>,
    store: Arc<AlertStore>,
    evaluator: Evaluator,
    notifier: Arc<dyn Notifier>,
    chat_id: i64,
}

impl AlertCycle {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        store: Arc<AlertStore>,
        evaluator: Evaluator,
        notifier: Arc<dyn Notifier>,
        chat_id: i64,
    ) -> Self {
        Self { source, store, evaluator, notifier, chat_id }
    }

    /// Both reads happen before any store mutation: a failed tick leaves
    /// alert state exactly as it was and the next tick retries naturally.
    pub async fn run_once(&self) {
        let snapshot = match self.source.system_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "system metrics unavailable, skipping tick");
                return;
            }
        };
        let containers = match self.source.container_statuses().await {
            Ok(containers) => containers,
            Err(e) => {
                tracing::warn!(error = %e, "container listing unavailable, skipping tick");
                return;
            }
        };

        let messages = self.evaluator.evaluate(&snapshot, &containers, Utc::now());
        if !messages.is_empty() {
            tracing::info!(transitions = messages.len(), "alert transitions this cycle");
        }
        for text in messages {
            self.dispatch(text);
        }
    }

    pub async fn send_daily_summary(&self) {
        let snapshot = match self.source.system_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "metrics unavailable, skipping daily summary");
                return;
            }
        };

        let now = Utc::now();
        let count = self.store.history_since(Duration::hours(24), now).len();
        let text = commands::render_daily_summary(now, &snapshot, count);

        if let Err(e) = self.notifier.send(self.chat_id, &text).await {
            tracing::warn!(error = %e, "daily summary delivery failed");
        }
    }

    // Delivery is decoupled from state: the transition is already committed
    // and a slow or failing send must not stall the remaining keys.
    fn dispatch(&self, text: String) {
        let notifier = self.notifier.clone();
        let chat_id = self.chat_id;
        tokio::spawn(async move {
            if let Err(e) = notifier.send(chat_id, &text).await {
                tracing::warn!(error = %e, channel = notifier.name(), "alert delivery failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::SourceError;
    use crate::notifier::NotifyError;
    use hostwatch_engine::{ContainerStatus, SystemSnapshot, Thresholds};
    use std::sync::Mutex;
    use std::time::Duration as StdDuration;
    use tokio::sync::mpsc;

    struct FakeSource {
        snapshot: Mutex<SystemSnapshot>,
        containers: Mutex<Vec<ContainerStatus>>,
        fail: Mutex<bool>,
    }

    impl FakeSource {
        fn new(cpu: f64) -> Self {
            Self {
                snapshot: Mutex::new(SystemSnapshot { cpu, ram: 40.0, disk: 50.0, load: 0.2 }),
                containers: Mutex::new(Vec::new()),
                fail: Mutex::new(false),
            }
        }
    }

    #[async_trait::async_trait]
    impl MetricsSource for FakeSource {
        async fn system_snapshot(&self) -> Result<SystemSnapshot, SourceError> {
            if *self.fail.lock().unwrap() {
                return Err(SourceError("unreachable".into()));
            }
            Ok(*self.snapshot.lock().unwrap())
        }

        async fn container_statuses(&self) -> Result<Vec<ContainerStatus>, SourceError> {
            if *self.fail.lock().unwrap() {
                return Err(SourceError("unreachable".into()));
            }
            Ok(self.containers.lock().unwrap().clone())
        }
    }

    struct RecordingNotifier {
        tx: mpsc::UnboundedSender<(i64, String)>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError("boom".into()));
            }
            self.tx.send((chat_id, text.to_string())).unwrap();
            Ok(())
        }
    }

    fn cycle(
        source: Arc<FakeSource>,
        fail_delivery: bool,
    ) -> (AlertCycle, Arc<AlertStore>, mpsc::UnboundedReceiver<(i64, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Arc::new(AlertStore::new());
        let evaluator = Evaluator::new(store.clone(), Thresholds::default().rules());
        let cycle = AlertCycle::new(
            source,
            store.clone(),
            evaluator,
            Arc::new(RecordingNotifier { tx, fail: fail_delivery }),
            42,
        );
        (cycle, store, rx)
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<(i64, String)>) -> (i64, String) {
        tokio::time::timeout(StdDuration::from_secs(2), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn high_cpu_opens_and_delivers_once() {
        let source = Arc::new(FakeSource::new(92.0));
        let (cycle, store, mut rx) = cycle(source, false);

        cycle.run_once().await;
        let (chat_id, text) = recv(&mut rx).await;
        assert_eq!(chat_id, 42);
        assert!(text.contains("92"));
        assert!(store.active().contains_key("cpu_high"));

        // Still hot next cycle: suppressed, nothing delivered.
        cycle.run_once().await;
        tokio::time::sleep(StdDuration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn recovery_delivers_resolution() {
        let source = Arc::new(FakeSource::new(92.0));
        let (cycle, store, mut rx) = cycle(source.clone(), false);

        cycle.run_once().await;
        recv(&mut rx).await;

        source.snapshot.lock().unwrap().cpu = 20.0;
        cycle.run_once().await;
        let (_, text) = recv(&mut rx).await;
        assert!(text.contains("Resolved"));
        assert!(store.active().is_empty());
    }

    #[tokio::test]
    async fn failed_source_skips_tick_without_mutation() {
        let source = Arc::new(FakeSource::new(92.0));
        *source.fail.lock().unwrap() = true;
        let (cycle, store, mut rx) = cycle(source, false);

        cycle.run_once().await;
        assert_eq!(store.active_count(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_delivery_keeps_transition() {
        let source = Arc::new(FakeSource::new(92.0));
        let (cycle, store, _rx) = cycle(source, true);

        cycle.run_once().await;
        tokio::time::sleep(StdDuration::from_millis(50)).await;
        // State committed before delivery; the send failure is logged only.
        assert!(store.active().contains_key("cpu_high"));
    }

    #[tokio::test]
    async fn container_transitions_flow_through() {
        let source = Arc::new(FakeSource::new(10.0));
        source
            .containers
            .lock()
            .unwrap()
            .push(ContainerStatus::new("db", "exited"));
        let (cycle, store, mut rx) = cycle(source, false);

        cycle.run_once().await;
        let (_, text) = recv(&mut rx).await;
        assert!(text.contains("db"));
        assert!(store.active().contains_key("container_db"));
    }

    #[tokio::test]
    async fn daily_summary_counts_recent_history() {
        let source = Arc::new(FakeSource::new(10.0));
        let (cycle, store, mut rx) = cycle(source, false);

        store.open("cpu_high", "High CPU usage: 95.0%", Utc::now());
        store.close("cpu_high", Utc::now());

        cycle.send_daily_summary().await;
        let (_, text) = recv(&mut rx).await;
        assert!(text.contains("Daily summary"));
        assert!(text.contains("Alerts in the last 24h: 1"));
    }
}
