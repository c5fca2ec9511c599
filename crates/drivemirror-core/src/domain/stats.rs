//! Per-pass outcome statistics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome counters accumulated during exactly one reconciliation pass
///
/// Each identifier processed by a pass contributes to exactly one counter:
/// a successful transfer bumps its success counter, a failed one bumps
/// `errors` instead (never both). The stats are returned to the caller and
/// then discarded; no history is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// New files created at the destination
    pub uploaded: u64,
    /// Existing destination entries overwritten with new content
    pub updated: u64,
    /// Destination entries removed because the source object is gone
    pub deleted: u64,
    /// Matched identifiers whose sizes agreed; no action taken
    pub unchanged: u64,
    /// Per-item failures of any kind (download, create, update, delete)
    pub errors: u64,
}

impl SyncStats {
    /// Total number of identifiers accounted for by this pass
    pub fn total(&self) -> u64 {
        self.uploaded + self.updated + self.deleted + self.unchanged + self.errors
    }

    /// True when the pass changed nothing and hit no errors
    pub fn is_converged(&self) -> bool {
        self.uploaded == 0 && self.updated == 0 && self.deleted == 0 && self.errors == 0
    }
}

impl fmt::Display for SyncStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uploaded={} updated={} deleted={} unchanged={} errors={}",
            self.uploaded, self.updated, self.deleted, self.unchanged, self.errors
        )
    }
}
