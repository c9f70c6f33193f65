pub mod alert;
pub mod metrics;

pub use alert::{AlertStore, Evaluator, HistoryRecord, OpenAlert, Signal, ThresholdRule, Thresholds};
pub use metrics::{ContainerStatus, SystemSnapshot};
