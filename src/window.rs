// ⏰ Time Windows - Explicit "now" for every query
// No window predicate ever reads the wall clock; the evaluation instant is
// always supplied by the caller, so the same query is reproducible in tests.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// TIME WINDOW
// ============================================================================

/// TimeWindow - predicate over time used to select entries relative to `now`
///
/// Two distinct window families:
/// - `SameDay` compares calendar dates. An entry logged at 23:59 stops
///   matching one minute later, no matter how recent it is.
/// - `LastDays` / `LastMonths` are rolling: inclusive lower bound, no upper
///   bound check (nothing is expected to be newer than `now`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    /// Same calendar date as `now` (NOT a rolling 24 hours)
    SameDay,

    /// Timestamps within the last `n` days of `now`
    LastDays(u32),

    /// Timestamps within the last `n` calendar months of `now`
    LastMonths(u32),
}

impl TimeWindow {
    /// Check whether an instant falls inside this window relative to `now`
    pub fn contains(&self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        match self {
            TimeWindow::SameDay => at.date_naive() == now.date_naive(),
            TimeWindow::LastDays(_) | TimeWindow::LastMonths(_) => match self.start(now) {
                Some(start) => at >= start,
                // Window opens before representable time: everything qualifies
                None => true,
            },
        }
    }

    /// Lower bound of the rolling windows
    ///
    /// `None` for `SameDay` (bounded by date equality, not an instant) and
    /// for rolling windows whose start precedes the representable range.
    /// Month arithmetic clamps at month ends (Mar 31 minus one month is
    /// Feb 28/29).
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeWindow::SameDay => None,
            TimeWindow::LastDays(days) => {
                now.checked_sub_signed(Duration::days(i64::from(*days)))
            }
            TimeWindow::LastMonths(months) => now.checked_sub_months(Months::new(*months)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
