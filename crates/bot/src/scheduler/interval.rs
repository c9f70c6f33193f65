use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Fixed-interval driver for the evaluation cycle. Ticks run one at a time
/// inside a single task; a cycle slower than the interval skips the missed
/// ticks instead of overlapping.
pub struct PeriodicTask {
    pub interval: Duration,
}

pub struct TaskHandle {
    handle: JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl TaskHandle {
    pub(crate) fn new(handle: JoinHandle<()>, stop: watch::Sender<bool>) -> Self {
        Self { handle, stop }
    }

    /// Stops accepting new ticks and waits for an in-flight tick to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(self, tick: F) -> TaskHandle
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(self.interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // Swallow the immediate first tick; the first cycle runs one
            // interval after startup.
            timer.tick().await;
            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,
                    _ = stop_rx.changed() => break,
                }
            }
        });
        TaskHandle::new(handle, stop_tx)
    }
}
