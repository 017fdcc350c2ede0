//! Calendar-day source for the reveal gate.
//!
//! The daily allowance compares calendar days only, so this is the one
//! place the runtime reads a clock. Tests pin the day with [`FixedClock`].

use std::sync::RwLock;

use chrono::NaiveDate;

/// Source of "today" in the consumer's local calendar.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local system calendar.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A pinned calendar day, settable by tests to cross midnight on demand.
pub struct FixedClock {
    day: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: RwLock::new(day),
        }
    }

    /// Move the pinned day.
    pub fn set(&self, day: NaiveDate) {
        let mut current = self
            .day
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *current = day;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self
            .day
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
