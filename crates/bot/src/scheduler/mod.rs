mod daily;
mod interval;

pub use daily::DailyTask;
pub use interval::{PeriodicTask, TaskHandle};
