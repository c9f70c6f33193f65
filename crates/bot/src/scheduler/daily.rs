use std::future::Future;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tokio::sync::watch;

use super::interval::TaskHandle;

/// Runs once per day at a fixed UTC time.
pub struct DailyTask {
    pub hour: u32,
    pub minute: u32,
}

/// Time until the next occurrence of `hour:minute` UTC, strictly in the
/// future: invoked exactly at the target instant it returns a full day.
pub fn until_next(hour: u32, minute: u32, now: DateTime<Utc>) -> Duration {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive().and_time(time).and_utc();
    let target = if today > now {
        today
    } else {
        today + Duration::days(1)
    };
    target - now
}

impl DailyTask {
    pub fn spawn<F, Fut>(self, tick: F) -> TaskHandle
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            loop {
                let wait = until_next(self.hour, self.minute, Utc::now())
                    .to_std()
                    .unwrap_or_default();
                tokio::select! {
                    _ = tokio::time::sleep(wait) => tick().await,
                    _ = stop_rx.changed() => break,
                }
            }
        });
        TaskHandle::new(handle, stop_tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn later_today() {
        let wait = until_next(10, 0, at(8, 30, 0));
        assert_eq!(wait, Duration::minutes(90));
    }

    #[test]
    fn already_passed_wraps_to_tomorrow() {
        let wait = until_next(10, 0, at(11, 0, 0));
        assert_eq!(wait, Duration::hours(23));
    }

    #[test]
    fn exactly_at_target_waits_a_full_day() {
        let wait = until_next(10, 0, at(10, 0, 0));
        assert_eq!(wait, Duration::days(1));
    }

    #[test]
    fn midnight_schedule() {
        let wait = until_next(0, 0, at(23, 59, 0));
        assert_eq!(wait, Duration::minutes(1));
    }
}
