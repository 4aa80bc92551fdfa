// 🛡️ Security Session - One in-memory session owning entries and blacklist
// The root object collaborators talk to. All mutation funnels through the
// entry store and the blacklist engine; the session itself only wires them
// together and exposes the two admin views.

use crate::analytics::{DashboardSnapshot, SecuritySummary};
use crate::blacklist::{BlacklistEngine, BlacklistRule, RuleStatus};
use crate::entry::{EntryStore, NewEntry, VehicleEntry};
use chrono::{DateTime, Duration, Utc};

// ============================================================================
// SECURITY SESSION
// ============================================================================

pub struct SecuritySession {
    entries: EntryStore,
    blacklist: BlacklistEngine,
}

impl SecuritySession {
    /// Create an empty session
    pub fn new() -> Self {
        SecuritySession {
            entries: EntryStore::new(),
            blacklist: BlacklistEngine::new(),
        }
    }

    /// Create a session pre-loaded with demo traffic and rules
    pub fn with_demo_data() -> Self {
        let mut session = SecuritySession::new();
        session.seed_demo_entries();
        session.seed_demo_rules();
        session
    }

    /// Seed a week of plausible gate traffic, backdated relative to now
    fn seed_demo_entries(&mut self) {
        let now = Utc::now();
        let seeds: [(&str, &str, &str, &str, i64); 12] = [
            ("ABC-123", "Car", "John Doe", "Business meeting", 0),
            ("XYZ-789", "Truck", "Jane Smith", "Delivery", 1),
            ("DEF-456", "SUV", "Mike Johnson", "Client visit", 2),
            ("GHI-789", "Van", "Sarah Wilson", "Equipment transport", 3),
            ("JKL-012", "Car", "David Brown", "Interview", 4),
            ("MNO-345", "Truck", "Lisa Davis", "Supply delivery", 24),
            ("PQR-678", "Car", "Tom Anderson", "Consultation", 25),
            ("STU-901", "SUV", "Emma Taylor", "Site inspection", 26),
            ("VWX-234", "Van", "Chris Lee", "Maintenance", 48),
            ("YZA-567", "Car", "Alex Garcia", "Training session", 72),
            ("BCD-890", "Truck", "Rachel Kim", "Material pickup", 96),
            ("EFG-123", "SUV", "Kevin Chen", "Team meeting", 120),
        ];

        for (plate, vehicle_type, driver, purpose, hours_ago) in seeds {
            self.entries.append_at(
                NewEntry::new(plate, vehicle_type, driver, purpose),
                now - Duration::hours(hours_ago),
            );
        }
    }

    /// Seed the standing rules: two active plates and one suspended case
    fn seed_demo_rules(&mut self) {
        let today = Utc::now().date_naive();
        let seeds: [(&str, &str, RuleStatus, i64); 3] = [
            (
                "ABC-123",
                "Suspicious activity detected",
                RuleStatus::Active,
                8,
            ),
            (
                "XYZ-789",
                "Unauthorized entry attempt",
                RuleStatus::Active,
                13,
            ),
            (
                "DEF-456",
                "Security violation - multiple infractions",
                RuleStatus::Suspended,
                15,
            ),
        ];

        for (plate, reason, status, days_ago) in seeds {
            let mut rule = BlacklistRule::new(
                plate.to_string(),
                reason.to_string(),
                status,
                "Admin".to_string(),
            );
            rule.added_date = today - Duration::days(days_ago);
            self.blacklist.register(rule);
        }
    }

    /// Guard-facing append; the returned record is the gate receipt
    pub fn log_entry(&mut self, data: NewEntry) -> VehicleEntry {
        self.entries.append(data)
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut EntryStore {
        &mut self.entries
    }

    pub fn blacklist(&self) -> &BlacklistEngine {
        &self.blacklist
    }

    pub fn blacklist_mut(&mut self) -> &mut BlacklistEngine {
        &mut self.blacklist
    }

    /// Admin overview as of `now`
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot::compute(&self.entries, now)
    }

    /// Security statistics over the full entry sequence
    pub fn security(&self) -> SecuritySummary {
        SecuritySummary::compute(&self.blacklist, &self.entries.all())
    }

    /// Every logged entry currently covered by an active rule, in log order
    ///
    /// Callers tail this for a "recent flagged" feed.
    pub fn flagged_entries(&self) -> Vec<VehicleEntry> {
        self.blacklist.matched_entries(&self.entries.all())
    }
}

impl Default for SecuritySession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
