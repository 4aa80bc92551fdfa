// 🚗 Entry Store - Append-only vehicle access log
// An entry is a value: logged once, never edited or deleted. Flagging is
// computed elsewhere and is never stored on the entry itself.

use crate::window::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

// ============================================================================
// VEHICLE ENTRY
// ============================================================================

/// VehicleEntry - one recorded vehicle access event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEntry {
    /// Stable identity (UUID) - assigned at creation, never reused
    pub id: String,

    /// Plate exactly as the guard entered it (no normalization here)
    pub plate_number: String,

    /// Free-text category label ("Car", "Truck", ...) - new labels are
    /// accepted as-is, this is not a closed enum
    pub vehicle_type: String,

    pub driver_name: String,

    pub purpose: String,

    /// Clock read at creation. Concurrent creation can produce equal or
    /// out-of-order timestamps, so queries reason from this value and never
    /// from sequence position.
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// NEW ENTRY
// ============================================================================

/// NewEntry - the guard-form payload: everything but id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub plate_number: String,
    pub vehicle_type: String,
    pub driver_name: String,
    pub purpose: String,
}

impl NewEntry {
    pub fn new(plate_number: &str, vehicle_type: &str, driver_name: &str, purpose: &str) -> Self {
        NewEntry {
            plate_number: plate_number.to_string(),
            vehicle_type: vehicle_type.to_string(),
            driver_name: driver_name.to_string(),
            purpose: purpose.to_string(),
        }
    }
}

// ============================================================================
// ENTRY STORE
// ============================================================================

/// Append-only sequence of vehicle entries with time-window queries
///
/// Readers share the collection, mutation is exclusive: one lock guards the
/// sequence. Every window query takes the evaluation instant as a parameter
/// instead of reading a clock.
pub struct EntryStore {
    entries: Arc<RwLock<Vec<VehicleEntry>>>,
}

impl EntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        EntryStore {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Log a new entry: fresh UUID, current timestamp, appended at the end
    ///
    /// Always succeeds. Field-presence validation is the calling form's
    /// concern, not the store's.
    pub fn append(&mut self, data: NewEntry) -> VehicleEntry {
        self.append_at(data, Utc::now())
    }

    /// Log an entry with an explicit timestamp (seed data, tests)
    pub fn append_at(&mut self, data: NewEntry, at: DateTime<Utc>) -> VehicleEntry {
        let entry = VehicleEntry {
            id: uuid::Uuid::new_v4().to_string(),
            plate_number: data.plate_number,
            vehicle_type: data.vehicle_type,
            driver_name: data.driver_name,
            purpose: data.purpose,
            timestamp: at,
        };

        let mut entries = self.entries.write().unwrap();
        entries.push(entry.clone());
        entry
    }

    /// Entries whose timestamp falls in the window relative to `now`
    ///
    /// Preserves insertion order; returns an empty vec when nothing matches.
    pub fn entries_in_window(&self, now: DateTime<Utc>, window: TimeWindow) -> Vec<VehicleEntry> {
        let entries = self.entries.read().unwrap();
        entries
            .iter()
            .filter(|e| window.contains(now, e.timestamp))
            .cloned()
            .collect()
    }

    /// Group entries by the literal vehicle_type string and count occurrences
    ///
    /// Case-sensitive: "Car" and "car" are distinct buckets. The result is in
    /// first-seen order, so identical input always yields identical output.
    pub fn count_by_type(entries: &[VehicleEntry]) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for entry in entries {
            match counts.iter().position(|(label, _)| label == &entry.vehicle_type) {
                Some(idx) => counts[idx].1 += 1,
                None => counts.push((entry.vehicle_type.clone(), 1)),
            }
        }

        counts
    }

    /// Most recent `n` entries, newest first
    ///
    /// Insertion order reversed, then truncated. A store with fewer than `n`
    /// entries returns all of them.
    pub fn most_recent(&self, n: usize) -> Vec<VehicleEntry> {
        let entries = self.entries.read().unwrap();
        entries.iter().rev().take(n).cloned().collect()
    }

    /// Snapshot of the full sequence in insertion order
    pub fn all(&self) -> Vec<VehicleEntry> {
        let entries = self.entries.read().unwrap();
        entries.clone()
    }

    /// Total entries logged (all time)
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap();
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
