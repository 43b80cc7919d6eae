//! Source of "today" for schedule lookups.
//!
//! The weekday is derived on every call rather than cached at start-up so a
//! bag left running overnight switches to the next day's schedule.

use crate::types::Weekday;
use chrono::{Datelike, Local};

/// Provides the current weekday.
pub trait WeekdayClock: Send + Sync {
    fn today(&self) -> Weekday;
}

/// Weekday from the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WeekdayClock for LocalClock {
    fn today(&self) -> Weekday {
        Local::now().weekday().into()
    }
}

/// A clock pinned to one weekday, for tests and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWeekday(pub Weekday);

impl WeekdayClock for FixedWeekday {
    fn today(&self) -> Weekday {
        self.0
    }
}

impl<C: WeekdayClock + ?Sized> WeekdayClock for std::sync::Arc<C> {
    fn today(&self) -> Weekday {
        (**self).today()
    }
}
