//! Listing snapshot types
//!
//! These are the port-level DTOs that the two listing operations produce.
//! They are immutable snapshots taken at listing time: the engine never
//! refreshes them mid-pass, so a pass always reasons about one consistent
//! pair of listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One object in the source bucket at listing time
///
/// Produced by the source-store adapter, which excludes directory markers
/// and zero-byte placeholder keys before the snapshot reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceObject {
    /// Object key; opaque, may contain `/` separators
    pub key: String,
    /// Object size in bytes
    pub size: u64,
    /// Last-modified timestamp reported by the store
    pub last_modified: DateTime<Utc>,
    /// Content hash (etag) with surrounding quotes stripped
    pub etag: String,
}

/// One leaf entry directly under the monitored destination folder
///
/// The destination listing is first-level only: entries inside subfolders
/// are not reported, and subfolders themselves are filtered out by the
/// adapter so that only files participate in reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Opaque entry handle, stable across renames and content updates
    pub id: String,
    /// Destination-visible file name
    pub name: String,
    /// Entry size in bytes
    pub size: u64,
}
