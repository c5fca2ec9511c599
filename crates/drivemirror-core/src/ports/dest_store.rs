//! Destination store port (driven/secondary port)
//!
//! This module defines the interface for the folder-based storage service the
//! engine converges towards. The primary implementation targets Google Drive,
//! but the trait only assumes a tree of named folders with opaque ids.
//!
//! ## Design Notes
//!
//! - All write operations take local file paths; the destination uploads
//!   from staged local content rather than streaming between remote stores.
//! - `list_entries` is first-level only by contract: the engine reconciles
//!   the direct children of the configured root folder, and files placed in
//!   subfolders are not reported back on later listings.

use std::path::Path;

use crate::domain::RemoteEntry;

/// Port trait for destination folder-store operations
#[async_trait::async_trait]
pub trait IDestinationStore: Send + Sync {
    /// The pre-configured root folder id all paths resolve under
    fn root_folder_id(&self) -> &str;

    /// Lists the leaf entries directly under the root folder
    ///
    /// Subfolders are not included in the result; only file entries
    /// participate in reconciliation. Pagination, if the backing service
    /// requires it, is handled internally.
    async fn list_entries(&self) -> anyhow::Result<Vec<RemoteEntry>>;

    /// Creates a new file named `name` under `parent_id` from local content
    ///
    /// Returns the id of the created entry. An empty id is a protocol
    /// violation the caller treats as failure.
    async fn create_file(
        &self,
        local_path: &Path,
        name: &str,
        parent_id: &str,
    ) -> anyhow::Result<String>;

    /// Overwrites an existing entry's content in place
    ///
    /// The entry keeps its name and parent folder; updates never relocate
    /// a file.
    async fn update_file(&self, id: &str, local_path: &Path) -> anyhow::Result<()>;

    /// Deletes one entry by id
    async fn delete_entry(&self, id: &str) -> anyhow::Result<()>;

    /// Looks up a folder named `name` directly under `parent_id`
    async fn find_folder(&self, name: &str, parent_id: &str) -> anyhow::Result<Option<String>>;

    /// Creates a folder named `name` under `parent_id`, returning its id
    async fn create_folder(&self, name: &str, parent_id: &str) -> anyhow::Result<String>;
}
