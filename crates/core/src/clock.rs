//! Clock abstraction for age-based rules.
//!
//! Domain code never reads the wall clock directly; it is handed a reference
//! year, usually obtained from a [`Clock`].

use chrono::{Datelike, Utc};

/// Source of the "current year".
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Wall-clock year (UTC).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}

/// A clock pinned to a single year, for deterministic runs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}
