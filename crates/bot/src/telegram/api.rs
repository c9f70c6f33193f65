use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::notifier::NotifyError;

const POLL_TIMEOUT_SECS: u64 = 30;

/// Minimal Telegram Bot API client: outbound `sendMessage` plus
/// `getUpdates` long polling for the command surface.
pub struct TelegramClient {
    base: String,
    client: Client,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self {
            base: format!("https://api.telegram.org/bot{token}"),
            client: Client::new(),
        }
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        self.client
            .post(format!("{}/sendMessage", self.base))
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifyError(e.to_string()))?;

        Ok(())
    }

    /// Long-polls for updates past `offset`. Blocks up to the server-side
    /// poll timeout when nothing is pending.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, NotifyError> {
        let response = self
            .client
            .get(format!("{}/getUpdates", self.base))
            .query(&[("offset", offset), ("timeout", POLL_TIMEOUT_SECS as i64)])
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .send()
            .await
            .map_err(|e| NotifyError(e.to_string()))?
            .error_for_status()
            .map_err(|e| NotifyError(e.to_string()))?;

        let body: UpdatesResponse = response
            .json()
            .await
            .map_err(|e| NotifyError(e.to_string()))?;

        if !body.ok {
            return Err(NotifyError("getUpdates returned ok=false".into()));
        }
        Ok(body.result)
    }
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_response_parses() {
        let json = r#"{
            "ok": true,
            "result": [
                {"update_id": 7, "message": {"text": "/alerts", "chat": {"id": 42}}},
                {"update_id": 8, "message": {"chat": {"id": 42}}},
                {"update_id": 9}
            ]
        }"#;
        let parsed: UpdatesResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.result.len(), 3);
        assert_eq!(parsed.result[0].update_id, 7);
        assert_eq!(
            parsed.result[0].message.as_ref().unwrap().text.as_deref(),
            Some("/alerts")
        );
        assert!(parsed.result[1].message.as_ref().unwrap().text.is_none());
        assert!(parsed.result[2].message.is_none());
    }

    #[test]
    fn empty_result_defaults() {
        let parsed: UpdatesResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(parsed.result.is_empty());
    }
}
