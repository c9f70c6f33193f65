mod evaluator;
mod event;
mod rule;
mod store;

pub use evaluator::{container_key, Evaluator};
pub use event::{HistoryRecord, OpenAlert};
pub use rule::{Signal, ThresholdRule, Thresholds};
pub use store::AlertStore;
