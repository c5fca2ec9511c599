//! Source store port (driven/secondary port)
//!
//! This module defines the interface for the flat object store that acts as
//! the source of truth. The primary implementation targets S3-compatible
//! storage, but the trait is storage-agnostic.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - Content moves through local staging files rather than in-memory buffers:
//!   the destination side uploads from local paths, so the executor downloads
//!   to a temp file and hands the path onward.

use std::path::Path;

use crate::domain::SourceObject;

/// Port trait for source object store operations
///
/// Implementations handle provider-specific API calls, pagination, and error
/// mapping. `list_objects` must return one [`SourceObject`] per real object:
/// directory markers (keys ending in `/`) and zero-byte placeholder keys are
/// the adapter's responsibility to filter out.
#[async_trait::async_trait]
pub trait ISourceStore: Send + Sync {
    /// Returns a full snapshot of the bucket's current objects
    ///
    /// The listing is recursive over the whole key space. Pagination, if the
    /// backing store requires it, is handled internally; callers always see
    /// one complete listing.
    async fn list_objects(&self) -> anyhow::Result<Vec<SourceObject>>;

    /// Downloads one object's content into `local_path`, replacing any
    /// existing file at that path
    async fn download_to(&self, key: &str, local_path: &Path) -> anyhow::Result<()>;

    /// Uploads a local file under the given key
    ///
    /// Used by setup and test tooling; the reconciliation pass itself never
    /// writes to the source.
    async fn upload_from(&self, local_path: &Path, key: &str) -> anyhow::Result<()>;

    /// Deletes one object (setup/test tooling, not the pass)
    async fn delete_object(&self, key: &str) -> anyhow::Result<()>;

    /// Returns whether an object exists under the given key
    async fn object_exists(&self, key: &str) -> anyhow::Result<bool>;
}
