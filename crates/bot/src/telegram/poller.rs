use std::sync::Arc;
use std::time::Duration;

use hostwatch_engine::AlertStore;

use super::api::TelegramClient;
use crate::collector::MetricsSource;
use crate::commands::{self, Command};

/// Long-polls Telegram for operator commands and answers inline. Reads the
/// store and metrics source directly; never mutates alert state.
pub struct CommandLoop {
    client: Arc<TelegramClient>,
    chat_id: i64,
    store: Arc<AlertStore>,
    source: Arc<dyn MetricsSource>,
}

impl CommandLoop {
    pub fn new(
        client: Arc<TelegramClient>,
        chat_id: i64,
        store: Arc<AlertStore>,
        source: Arc<dyn MetricsSource>,
    ) -> Self {
        Self { client, chat_id, store, source }
    }

    pub async fn run(self) {
        let mut offset = 0i64;
        loop {
            let updates = match self.client.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!(error = %e, "getUpdates failed, retrying in 5s");
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);

                let Some(message) = update.message else { continue };
                if message.chat.id != self.chat_id {
                    tracing::debug!(chat_id = message.chat.id, "ignoring foreign chat");
                    continue;
                }
                let Some(command) = message.text.as_deref().and_then(Command::parse) else {
                    continue;
                };

                let reply = self.respond(command).await;
                if let Err(e) = self.client.send_message(self.chat_id, &reply).await {
                    tracing::warn!(error = %e, ?command, "failed to send command reply");
                }
            }
        }
    }

    /// Always produces a reply; a failed read renders as a short failure
    /// line rather than silence.
    async fn respond(&self, command: Command) -> String {
        match command {
            Command::ServerStatus => match self.source.system_snapshot().await {
                Ok(snapshot) => commands::render_status(&snapshot, self.store.active_count()),
                Err(e) => {
                    tracing::warn!(error = %e, "status command failed");
                    "Could not read system metrics.".into()
                }
            },
            Command::DockerStatus => match self.source.container_statuses().await {
                Ok(containers) => commands::render_containers(&containers),
                Err(e) => {
                    tracing::warn!(error = %e, "docker command failed");
                    "Could not list containers.".into()
                }
            },
            Command::Alerts => commands::render_alerts(&self.store.active()),
        }
    }
}
