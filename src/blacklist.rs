// ⛔ Blacklist Engine - Flagged plates with active/suspended rules
// A rule associates a plate with a reason and a status. Whether an entry is
// flagged is computed against the current rule set on every call, so there
// is no stored flag to go stale.

use crate::entry::VehicleEntry;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

// ============================================================================
// RULE STATUS
// ============================================================================

/// Only `Active` rules flag a plate; `Suspended` rules are retained but inert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Active,
    Suspended,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::Active => "active",
            RuleStatus::Suspended => "suspended",
        }
    }
}

// ============================================================================
// BLACKLIST RULE
// ============================================================================

/// BlacklistRule - one flagged plate with justification and provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistRule {
    /// Stable identity (UUID)
    pub id: String,

    /// Stored normalized (trimmed, uppercased) so matching against entries
    /// is case-insensitive
    pub plate_number: String,

    /// Free-text justification
    pub reason: String,

    /// Provenance, set at creation
    pub added_date: NaiveDate,
    pub added_by: String,

    pub status: RuleStatus,
}

impl BlacklistRule {
    /// Build a rule with a fresh UUID and today's date; normalizes the plate
    pub fn new(plate_number: String, reason: String, status: RuleStatus, added_by: String) -> Self {
        BlacklistRule {
            id: uuid::Uuid::new_v4().to_string(),
            plate_number: normalize_plate(&plate_number),
            reason,
            added_date: Utc::now().date_naive(),
            added_by,
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A required field was empty after trimming; the rule collection is untouched
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn empty_field(field: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: "Required field is empty".to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// BLACKLIST STATS
// ============================================================================

/// Counts over the current rule collection, recomputed on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistStats {
    pub active_count: usize,
    pub suspended_count: usize,
    pub total_count: usize,
}

// ============================================================================
// BLACKLIST ENGINE
// ============================================================================

/// Owns the rule collection and computes which entries are currently flagged
///
/// Readers share the collection, mutation is exclusive: one lock guards the
/// rule list. Matching is a pure function of the rule set and the entry set
/// passed in.
pub struct BlacklistEngine {
    rules: Arc<RwLock<Vec<BlacklistRule>>>,

    /// Operator name stamped into `added_by` on new rules
    actor: String,
}

impl BlacklistEngine {
    /// Create an empty engine acting as "Admin"
    pub fn new() -> Self {
        Self::with_actor("Admin")
    }

    /// Create an empty engine acting as a specific operator
    pub fn with_actor(actor: &str) -> Self {
        BlacklistEngine {
            rules: Arc::new(RwLock::new(Vec::new())),
            actor: actor.to_string(),
        }
    }

    /// Add an active rule for a plate
    ///
    /// Fails when the plate or the reason is empty after trimming; nothing
    /// is appended on failure.
    pub fn add_rule(&mut self, plate_number: &str, reason: &str) -> Result<BlacklistRule, ValidationError> {
        self.add_rule_with_status(plate_number, reason, RuleStatus::Active)
    }

    /// Add a rule with an explicit initial status
    pub fn add_rule_with_status(
        &mut self,
        plate_number: &str,
        reason: &str,
        status: RuleStatus,
    ) -> Result<BlacklistRule, ValidationError> {
        if plate_number.trim().is_empty() {
            return Err(ValidationError::empty_field("plate_number"));
        }
        if reason.trim().is_empty() {
            return Err(ValidationError::empty_field("reason"));
        }

        let rule = BlacklistRule::new(
            plate_number.to_string(),
            reason.to_string(),
            status,
            self.actor.clone(),
        );

        let mut rules = self.rules.write().unwrap();
        rules.push(rule.clone());
        Ok(rule)
    }

    /// Append a pre-built rule without validation (seeding, imports)
    ///
    /// Callers are responsible for keeping the plate normalized.
    pub fn register(&mut self, rule: BlacklistRule) {
        let mut rules = self.rules.write().unwrap();
        rules.push(rule);
    }

    /// Remove the rule with this id
    ///
    /// Returns whether a rule was removed. An unknown id is a no-op, not an
    /// error: double-clicks and stale views make it a normal outcome.
    pub fn remove_rule(&mut self, id: &str) -> bool {
        let mut rules = self.rules.write().unwrap();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        rules.len() < before
    }

    /// Update a rule's status in place; same not-found semantics as remove
    pub fn set_status(&mut self, id: &str, status: RuleStatus) -> bool {
        let mut rules = self.rules.write().unwrap();
        match rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.status = status;
                true
            }
            None => false,
        }
    }

    /// Entries whose plate is covered by at least one active rule
    ///
    /// Preserves the input's relative order; every entry sharing a flagged
    /// plate is included. A suspended rule never cancels an active rule for
    /// the same plate. The normalized-plate index makes a pass over the
    /// rules once instead of rescanning them for every entry.
    pub fn matched_entries(&self, entries: &[VehicleEntry]) -> Vec<VehicleEntry> {
        let active_plates = self.active_plate_index();

        entries
            .iter()
            .filter(|e| active_plates.contains(&normalize_plate(&e.plate_number)))
            .cloned()
            .collect()
    }

    /// Check a single plate against the active rules
    pub fn is_flagged(&self, plate_number: &str) -> bool {
        self.active_plate_index()
            .contains(&normalize_plate(plate_number))
    }

    /// Normalized plates of all active rules
    fn active_plate_index(&self) -> HashSet<String> {
        let rules = self.rules.read().unwrap();
        rules
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.plate_number.clone())
            .collect()
    }

    /// Snapshot of all rules in insertion order
    pub fn rules(&self) -> Vec<BlacklistRule> {
        let rules = self.rules.read().unwrap();
        rules.clone()
    }

    /// Snapshot of the rules currently in the given status
    pub fn rules_with_status(&self, status: RuleStatus) -> Vec<BlacklistRule> {
        let rules = self.rules.read().unwrap();
        rules.iter().filter(|r| r.status == status).cloned().collect()
    }

    /// Number of rules in the collection
    pub fn rule_count(&self) -> usize {
        let rules = self.rules.read().unwrap();
        rules.len()
    }

    /// Live counts over the rule collection
    pub fn stats(&self) -> BlacklistStats {
        let rules = self.rules.read().unwrap();
        let active_count = rules.iter().filter(|r| r.is_active()).count();

        BlacklistStats {
            active_count,
            suspended_count: rules.len() - active_count,
            total_count: rules.len(),
        }
    }
}

impl Default for BlacklistEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Canonical plate form shared by rule storage and entry matching
fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_plate(plate: &str) -> VehicleEntry {
        VehicleEntry {
            id: uuid::Uuid::new_v4().to_string(),
            plate_number: plate.to_string(),
            vehicle_type: "Car".to_string(),
            driver_name: "Test Driver".to_string(),
            purpose: "Testing".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_add_rule_normalizes_plate() {
        let mut engine = BlacklistEngine::new();

        let rule = engine.add_rule("  abc-123 ", "Suspicious activity").unwrap();

        assert_eq!(rule.plate_number, "ABC-123");
        assert_eq!(rule.reason, "Suspicious activity");
        assert_eq!(rule.status, RuleStatus::Active);
        assert_eq!(rule.added_by, "Admin");
        assert_eq!(rule.added_date, Utc::now().date_naive());
        assert!(!rule.id.is_empty());
        assert_eq!(engine.rule_count(), 1);
    }

    #[test]
    fn test_add_rule_with_status_suspended() {
        let mut engine = BlacklistEngine::new();

        let rule = engine
            .add_rule_with_status("DEF-456", "Multiple infractions", RuleStatus::Suspended)
            .unwrap();

        assert_eq!(rule.status, RuleStatus::Suspended);
        assert_eq!(engine.stats().suspended_count, 1);
        assert_eq!(engine.stats().active_count, 0);
    }

    #[test]
    fn test_add_rule_rejects_empty_plate() {
        let mut engine = BlacklistEngine::new();

        let err = engine.add_rule("", "Some reason").unwrap_err();
        assert_eq!(err.field, "plate_number");

        // Whitespace-only counts as empty too
        assert!(engine.add_rule("   ", "Some reason").is_err());

        // Collection untouched on failure
        assert_eq!(engine.rule_count(), 0);
        assert_eq!(engine.stats().total_count, 0);
    }

    #[test]
    fn test_add_rule_rejects_empty_reason() {
        let mut engine = BlacklistEngine::new();

        let err = engine.add_rule("ABC-123", "   ").unwrap_err();
        assert_eq!(err.field, "reason");
        assert_eq!(engine.rule_count(), 0);
    }

    #[test]
    fn test_with_actor_stamps_added_by() {
        let mut engine = BlacklistEngine::with_actor("Supervisor");

        let rule = engine.add_rule("ABC-123", "Tailgating").unwrap();
        assert_eq!(rule.added_by, "Supervisor");
    }

    #[test]
    fn test_remove_rule_is_idempotent() {
        let mut engine = BlacklistEngine::new();
        let rule = engine.add_rule("ABC-123", "Suspicious activity").unwrap();

        assert!(engine.remove_rule(&rule.id));
        assert_eq!(engine.rule_count(), 0);

        // Second removal finds nothing and changes nothing
        assert!(!engine.remove_rule(&rule.id));
        assert_eq!(engine.rule_count(), 0);
    }

    #[test]
    fn test_set_status_unknown_id() {
        let mut engine = BlacklistEngine::new();

        assert!(!engine.set_status("no-such-id", RuleStatus::Suspended));
    }

    #[test]
    fn test_match_round_trip_with_suspension() {
        let mut engine = BlacklistEngine::new();
        let rule = engine.add_rule("abc-123", "test").unwrap();

        let entries = vec![entry_with_plate("ABC-123")];

        // Case-insensitive: the lowercased rule matches the uppercased entry
        let matched = engine.matched_entries(&entries);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].plate_number, "ABC-123");

        // Suspending the rule stops the match
        assert!(engine.set_status(&rule.id, RuleStatus::Suspended));
        assert!(engine.matched_entries(&entries).is_empty());

        // And reactivating restores it
        assert!(engine.set_status(&rule.id, RuleStatus::Active));
        assert_eq!(engine.matched_entries(&entries).len(), 1);
    }

    #[test]
    fn test_matched_entries_ignores_suspended_rules() {
        let mut engine = BlacklistEngine::new();
        engine.add_rule("XYZ-789", "Unauthorized entry attempt").unwrap();
        engine
            .add_rule_with_status("DEF-456", "Multiple infractions", RuleStatus::Suspended)
            .unwrap();

        let entries = vec![entry_with_plate("XYZ-789"), entry_with_plate("DEF-456")];

        let matched = engine.matched_entries(&entries);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].plate_number, "XYZ-789");
    }

    #[test]
    fn test_active_rule_wins_over_suspended_for_same_plate() {
        let mut engine = BlacklistEngine::new();
        engine
            .add_rule_with_status("ABC-123", "Old case, on hold", RuleStatus::Suspended)
            .unwrap();
        engine.add_rule("ABC-123", "New incident").unwrap();

        let entries = vec![entry_with_plate("ABC-123")];
        assert_eq!(engine.matched_entries(&entries).len(), 1);
    }

    #[test]
    fn test_matched_entries_includes_every_entry_for_a_plate() {
        let mut engine = BlacklistEngine::new();
        engine.add_rule("ABC-123", "Suspicious activity").unwrap();

        let entries = vec![
            entry_with_plate("ABC-123"),
            entry_with_plate("KLM-555"),
            entry_with_plate("abc-123"),
        ];

        let matched = engine.matched_entries(&entries);
        assert_eq!(matched.len(), 2);
        // Input order preserved
        assert_eq!(matched[0].plate_number, "ABC-123");
        assert_eq!(matched[1].plate_number, "abc-123");
    }

    #[test]
    fn test_matched_entries_empty_inputs() {
        let mut engine = BlacklistEngine::new();
        assert!(engine.matched_entries(&[]).is_empty());

        engine.add_rule("ABC-123", "Suspicious activity").unwrap();
        assert!(engine.matched_entries(&[]).is_empty());

        let unrelated = vec![entry_with_plate("ZZZ-999")];
        assert!(engine.matched_entries(&unrelated).is_empty());
    }

    #[test]
    fn test_is_flagged() {
        let mut engine = BlacklistEngine::new();
        let rule = engine.add_rule("ABC-123", "Suspicious activity").unwrap();

        assert!(engine.is_flagged("abc-123"));
        assert!(engine.is_flagged(" ABC-123 "));
        assert!(!engine.is_flagged("XYZ-789"));

        engine.set_status(&rule.id, RuleStatus::Suspended);
        assert!(!engine.is_flagged("ABC-123"));
    }

    #[test]
    fn test_stats_recomputed_per_call() {
        let mut engine = BlacklistEngine::new();
        let first = engine.add_rule("AAA-111", "r1").unwrap();
        engine.add_rule("BBB-222", "r2").unwrap();
        engine
            .add_rule_with_status("CCC-333", "r3", RuleStatus::Suspended)
            .unwrap();

        assert_eq!(
            engine.stats(),
            BlacklistStats {
                active_count: 2,
                suspended_count: 1,
                total_count: 3,
            }
        );

        engine.set_status(&first.id, RuleStatus::Suspended);
        assert_eq!(engine.stats().active_count, 1);
        assert_eq!(engine.stats().suspended_count, 2);

        engine.remove_rule(&first.id);
        assert_eq!(engine.stats().total_count, 2);
    }

    #[test]
    fn test_rules_with_status_views() {
        let mut engine = BlacklistEngine::new();
        engine.add_rule("AAA-111", "r1").unwrap();
        engine
            .add_rule_with_status("BBB-222", "r2", RuleStatus::Suspended)
            .unwrap();
        engine.add_rule("CCC-333", "r3").unwrap();

        let active = engine.rules_with_status(RuleStatus::Active);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].plate_number, "AAA-111");
        assert_eq!(active[1].plate_number, "CCC-333");

        let suspended = engine.rules_with_status(RuleStatus::Suspended);
        assert_eq!(suspended.len(), 1);
        assert_eq!(suspended[0].plate_number, "BBB-222");

        assert_eq!(engine.rules().len(), 3);
    }

    #[test]
    fn test_register_appends_prebuilt_rule() {
        let mut engine = BlacklistEngine::new();

        let rule = BlacklistRule::new(
            "ghi-789".to_string(),
            "Imported from the old ledger".to_string(),
            RuleStatus::Active,
            "Importer".to_string(),
        );
        engine.register(rule);

        assert_eq!(engine.rule_count(), 1);
        assert!(engine.is_flagged("GHI-789"));
        assert_eq!(engine.rules()[0].added_by, "Importer");
    }

    #[test]
    fn test_rule_serializes_camel_case() {
        let rule = BlacklistRule::new(
            "abc-123".to_string(),
            "Suspicious activity".to_string(),
            RuleStatus::Active,
            "Admin".to_string(),
        );

        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"plateNumber\":\"ABC-123\""));
        assert!(json.contains("\"status\":\"active\""));
        assert!(json.contains("\"addedBy\":\"Admin\""));
        assert!(json.contains("\"addedDate\""));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::empty_field("plate_number");
        assert_eq!(err.to_string(), "plate_number: Required field is empty");
    }
}
