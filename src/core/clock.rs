use chrono::{Local, NaiveDateTime, Timelike};

/// Source of "now" for stamping punches.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the process' local time zone, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}
