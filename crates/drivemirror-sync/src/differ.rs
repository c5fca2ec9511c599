//! Snapshot differ
//!
//! Pure, order-independent set algebra over two already-fetched listings.
//! No network calls happen here: the differ receives one source snapshot and
//! one destination snapshot and partitions the union of their identifiers
//! into three disjoint sets. The update-vs-unchanged decision for matched
//! identifiers is a byte-size comparison only; same-size content changes are
//! never detected.

use std::collections::BTreeMap;

use tracing::warn;

use drivemirror_core::domain::{identifier_for, AddressingMode, RemoteEntry, SourceObject};

/// The three disjoint identifier partitions produced by [`diff`]
///
/// Every identifier appearing in either listing lands in exactly one of the
/// three vectors. Vectors are in ascending identifier order because the
/// indexes are `BTreeMap`s; the engine makes no ordering promise beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Present in the source only; needs a fresh upload
    pub to_upload: Vec<String>,
    /// Present on both sides; candidate for update-vs-unchanged
    pub to_check: Vec<String>,
    /// Present at the destination only; needs deletion
    pub to_delete: Vec<String>,
}

/// Indexes a source listing by derived identifier
///
/// Flattened-mode identifiers can collide (`a/b.txt` and `a_b.txt` both map
/// to `a_b.txt`). Collisions are resolved last-write-wins in listing order,
/// with a warning naming the dropped key.
pub fn build_source_index(
    objects: Vec<SourceObject>,
    mode: AddressingMode,
) -> BTreeMap<String, SourceObject> {
    let mut index = BTreeMap::new();
    for object in objects {
        let identifier = identifier_for(&object.key, mode);
        if let Some(previous) = index.insert(identifier.clone(), object) {
            warn!(
                identifier = %identifier,
                dropped_key = %previous.key,
                "Identifier collision in source listing; keeping the later object"
            );
        }
    }
    index
}

/// Indexes a destination listing by entry name
///
/// Entry names are the destination-side identifiers. Duplicate names within
/// one listing are unexpected but tolerated the same way as source
/// collisions: last one wins, with a warning.
pub fn build_dest_index(entries: Vec<RemoteEntry>) -> BTreeMap<String, RemoteEntry> {
    let mut index = BTreeMap::new();
    for entry in entries {
        if let Some(previous) = index.insert(entry.name.clone(), entry) {
            warn!(
                name = %previous.name,
                dropped_id = %previous.id,
                "Duplicate entry name in destination listing; keeping the later entry"
            );
        }
    }
    index
}

/// Partitions the union of both identifier sets
pub fn diff(
    source: &BTreeMap<String, SourceObject>,
    dest: &BTreeMap<String, RemoteEntry>,
) -> SnapshotDiff {
    let mut result = SnapshotDiff::default();

    for identifier in source.keys() {
        if dest.contains_key(identifier) {
            result.to_check.push(identifier.clone());
        } else {
            result.to_upload.push(identifier.clone());
        }
    }

    for identifier in dest.keys() {
        if !source.contains_key(identifier) {
            result.to_delete.push(identifier.clone());
        }
    }

    result
}

/// Size-only modification heuristic for matched identifiers
pub fn needs_update(object: &SourceObject, entry: &RemoteEntry) -> bool {
    object.size != entry.size
}
