mod api;
mod poller;

pub use api::{Chat, Message, TelegramClient, Update};
pub use poller::CommandLoop;
