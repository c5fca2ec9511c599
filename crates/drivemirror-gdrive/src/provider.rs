//! DriveDestinationStore - IDestinationStore implementation for Google Drive
//!
//! Wraps the [`DriveClient`] and maps Drive's file representation onto the
//! port-level [`RemoteEntry`] DTO.
//!
//! ## Design Notes
//!
//! - `list_entries` reports the direct children of the configured root
//!   folder only, and drops folder-typed children: folders are containers
//!   for hierarchical placement, not entries to reconcile. Without that
//!   filter every subfolder the engine creates would be scheduled for
//!   deletion on the following pass.
//! - Drive reports sizes as decimal strings; missing or malformed sizes
//!   map to 0.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use drivemirror_core::domain::RemoteEntry;
use drivemirror_core::ports::IDestinationStore;

use crate::client::DriveClient;

/// Destination store implementation that delegates to the Drive v3 API
pub struct DriveDestinationStore {
    client: DriveClient,
    root_folder_id: String,
}

impl DriveDestinationStore {
    /// Creates a store rooted at the given Drive folder id
    pub fn new(client: DriveClient, root_folder_id: impl Into<String>) -> Self {
        Self {
            client,
            root_folder_id: root_folder_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl IDestinationStore for DriveDestinationStore {
    fn root_folder_id(&self) -> &str {
        &self.root_folder_id
    }

    async fn list_entries(&self) -> Result<Vec<RemoteEntry>> {
        let children = self.client.list_children(&self.root_folder_id).await?;

        let entries: Vec<RemoteEntry> = children
            .into_iter()
            .filter(|file| !file.is_folder())
            .map(|file| {
                let size = file.size_bytes();
                RemoteEntry {
                    id: file.id,
                    name: file.name,
                    size,
                }
            })
            .collect();

        debug!(count = entries.len(), "Listed destination entries");
        Ok(entries)
    }

    async fn create_file(
        &self,
        local_path: &Path,
        name: &str,
        parent_id: &str,
    ) -> Result<String> {
        self.client.upload_file(local_path, name, parent_id).await
    }

    async fn update_file(&self, id: &str, local_path: &Path) -> Result<()> {
        self.client.update_file(id, local_path).await
    }

    async fn delete_entry(&self, id: &str) -> Result<()> {
        self.client.delete_file(id).await
    }

    async fn find_folder(&self, name: &str, parent_id: &str) -> Result<Option<String>> {
        self.client.find_folder(name, parent_id).await
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String> {
        self.client.create_folder(name, parent_id).await
    }
}
