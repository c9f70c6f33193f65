mod channel;
mod telegram;

pub use channel::{Notifier, NotifyError};
pub use telegram::TelegramNotifier;
