use std::sync::Arc;

use super::channel::{Notifier, NotifyError};
use crate::telegram::TelegramClient;

pub struct TelegramNotifier {
    client: Arc<TelegramClient>,
}

impl TelegramNotifier {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        self.client.send_message(chat_id, text).await
    }
}
