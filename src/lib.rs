// KofaSentinel Core - Facility access logging engine
// Exposes the entry store, blacklist engine, and dashboard analytics

pub mod entry;
pub mod window;
pub mod blacklist;
pub mod analytics;
pub mod session;

// Re-export commonly used types
pub use entry::{EntryStore, NewEntry, VehicleEntry};
pub use window::TimeWindow;
pub use blacklist::{
    BlacklistEngine, BlacklistRule, BlacklistStats, RuleStatus, ValidationError,
};
pub use analytics::{DashboardSnapshot, SecuritySummary, TypeCount};
pub use session::SecuritySession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
