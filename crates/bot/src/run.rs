use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use hostwatch_engine::{AlertStore, Evaluator};

use crate::checker::AlertCycle;
use crate::cli::Opts;
use crate::collector::{HostSource, MetricsSource};
use crate::config::{self, BotConfig};
use crate::notifier::TelegramNotifier;
use crate::scheduler::{DailyTask, PeriodicTask};
use crate::telegram::{CommandLoop, TelegramClient};

pub async fn run(opts: Opts) -> anyhow::Result<()> {
    let token = std::env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?;
    let chat_id: i64 = std::env::var("CHAT_ID")
        .context("CHAT_ID must be set")?
        .parse()
        .context("CHAT_ID must be a numeric chat identifier")?;

    let cfg = match &opts.config {
        Some(path) => config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BotConfig::default(),
    };

    tracing::info!(
        chat_id,
        interval_s = cfg.check_interval_seconds,
        summary_hour = cfg.daily_summary.hour,
        summary_minute = cfg.daily_summary.minute,
        cpu = cfg.thresholds.cpu,
        ram = cfg.thresholds.ram,
        disk = cfg.thresholds.disk,
        "hostwatch configured"
    );

    let store = Arc::new(AlertStore::new());
    let source: Arc<dyn MetricsSource> =
        Arc::new(HostSource::new().context("connecting to metrics sources")?);
    let client = Arc::new(TelegramClient::new(&token));
    let notifier = Arc::new(TelegramNotifier::new(client.clone()));

    let evaluator = Evaluator::new(store.clone(), cfg.thresholds.rules());
    let cycle = Arc::new(AlertCycle::new(
        source.clone(),
        store.clone(),
        evaluator,
        notifier,
        chat_id,
    ));

    // Exactly one interval job, one daily job, one command poller.
    let check_handle = {
        let cycle = cycle.clone();
        PeriodicTask {
            interval: Duration::from_secs(cfg.check_interval_seconds),
        }
        .spawn(move || {
            let cycle = cycle.clone();
            async move { cycle.run_once().await }
        })
    };

    let daily_handle = {
        let cycle = cycle.clone();
        DailyTask {
            hour: cfg.daily_summary.hour,
            minute: cfg.daily_summary.minute,
        }
        .spawn(move || {
            let cycle = cycle.clone();
            async move { cycle.send_daily_summary().await }
        })
    };

    let poller = CommandLoop::new(client, chat_id, store, source);
    let poll_handle = tokio::spawn(poller.run());

    tracing::info!("hostwatch running");
    crate::shutdown::wait_for_shutdown().await;
    tracing::info!("shutting down");

    check_handle.stop().await;
    daily_handle.stop().await;
    poll_handle.abort();

    Ok(())
}
