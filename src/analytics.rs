// 📊 Dashboard Analytics - Windowed counts, growth, and security statistics
// Pure aggregation over the entry store and the blacklist engine. The
// evaluation instant is always passed in, so a render reads the clock once
// and every card on it agrees about what "today" means.

use crate::blacklist::BlacklistEngine;
use crate::entry::{EntryStore, VehicleEntry};
use crate::window::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// TYPE COUNT
// ============================================================================

/// One vehicle-type bar: label, count, and percentage of the grouped total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    pub label: String,
    pub count: usize,
    pub share: f64,
}

// ============================================================================
// DASHBOARD SNAPSHOT
// ============================================================================

/// Everything the admin overview shows, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// All-time entry count
    pub total_entries: usize,

    /// Same calendar day as the evaluation instant (UTC)
    pub today_count: usize,

    /// Rolling 7 days
    pub week_count: usize,

    /// Rolling calendar month
    pub month_count: usize,

    /// Today's entries spread over a 24h day
    pub avg_hourly_rate: f64,

    /// Percent change of the last 7 days against the 7 days before them.
    /// `None` when the prior span has no entries: a ratio against an empty
    /// baseline would be noise, not signal.
    pub weekly_growth: Option<f64>,

    /// Per-type counts over all entries, in first-seen order
    pub vehicle_types: Vec<TypeCount>,

    /// Number of distinct vehicle-type labels
    pub distinct_types: usize,
}

impl DashboardSnapshot {
    /// Aggregate the store as of `now`
    pub fn compute(store: &EntryStore, now: DateTime<Utc>) -> DashboardSnapshot {
        let all = store.all();

        let today_count = store.entries_in_window(now, TimeWindow::SameDay).len();
        let week_count = store.entries_in_window(now, TimeWindow::LastDays(7)).len();
        let month_count = store.entries_in_window(now, TimeWindow::LastMonths(1)).len();

        // The 7-day window is a subset of the 14-day window, so the
        // difference is exactly the preceding week's span.
        let two_week_count = store.entries_in_window(now, TimeWindow::LastDays(14)).len();
        let prior_week_count = two_week_count - week_count;
        let weekly_growth = if prior_week_count == 0 {
            None
        } else {
            Some(
                (week_count as f64 - prior_week_count as f64) / prior_week_count as f64 * 100.0,
            )
        };

        let total = all.len();
        let vehicle_types: Vec<TypeCount> = EntryStore::count_by_type(&all)
            .into_iter()
            .map(|(label, count)| TypeCount {
                label,
                count,
                share: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                },
            })
            .collect();
        let distinct_types = vehicle_types.len();

        DashboardSnapshot {
            total_entries: total,
            today_count,
            week_count,
            month_count,
            avg_hourly_rate: today_count as f64 / 24.0,
            weekly_growth,
            vehicle_types,
            distinct_types,
        }
    }

    pub fn summary(&self) -> String {
        let growth = match self.weekly_growth {
            Some(pct) => format!("{:+.1}% vs prior week", pct),
            None => "no prior-week baseline".to_string(),
        };

        format!(
            "{} entries: {} today, {} this week, {} this month | {:.1}/hr today | {} vehicle types | {}",
            self.total_entries,
            self.today_count,
            self.week_count,
            self.month_count,
            self.avg_hourly_rate,
            self.distinct_types,
            growth
        )
    }
}

// ============================================================================
// SECURITY SUMMARY
// ============================================================================

/// The four security tiles: rule counts plus flagged entries over a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub active_count: usize,
    pub suspended_count: usize,
    pub flagged_count: usize,
    pub total_count: usize,
}

impl SecuritySummary {
    /// Count rules by status and flag the supplied entries
    pub fn compute(engine: &BlacklistEngine, entries: &[VehicleEntry]) -> SecuritySummary {
        let stats = engine.stats();

        SecuritySummary {
            active_count: stats.active_count,
            suspended_count: stats.suspended_count,
            flagged_count: engine.matched_entries(entries).len(),
            total_count: stats.total_count,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rules: {} active, {} suspended | {} flagged entries",
            self.total_count, self.active_count, self.suspended_count, self.flagged_count
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
