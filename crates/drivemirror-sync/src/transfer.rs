//! Staged transfer execution
//!
//! Moves one object at a time from the source store to the destination.
//! Content is staged through a local temporary file because the destination
//! uploads from local paths rather than streaming between remote stores.
//! The staging file is owned by a [`NamedTempFile`] handle, so it is removed
//! on every exit path; only a cleanup failure on the success path is
//! observable, and it is downgraded to a logged warning.
//!
//! Failures never escape this module: each operation reports success or
//! failure as a boolean and the enclosing pass moves on to the next item.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use drivemirror_core::domain::{split_identifier, AddressingMode, RemoteEntry, SourceObject};
use drivemirror_core::ports::{IDestinationStore, ISourceStore};

use crate::folders::FolderResolver;

/// Executes per-item transfers between the two stores
pub struct TransferExecutor {
    source: Arc<dyn ISourceStore>,
    dest: Arc<dyn IDestinationStore>,
    mode: AddressingMode,
}

impl TransferExecutor {
    pub fn new(
        source: Arc<dyn ISourceStore>,
        dest: Arc<dyn IDestinationStore>,
        mode: AddressingMode,
    ) -> Self {
        Self { source, dest, mode }
    }

    /// Stages `object` and creates a new destination file for `identifier`
    ///
    /// In hierarchical mode the identifier's directory part is resolved (and
    /// created) through the shared resolver; in flattened mode the file lands
    /// in the root folder under the flattened name.
    ///
    /// Returns `true` on success. All errors are logged and reported as
    /// `false`; they never abort the enclosing pass.
    pub async fn upload(
        &self,
        object: &SourceObject,
        identifier: &str,
        resolver: &mut FolderResolver,
    ) -> bool {
        match self.try_upload(object, identifier, resolver).await {
            Ok(()) => {
                debug!(identifier = %identifier, key = %object.key, "Uploaded new file");
                true
            }
            Err(err) => {
                warn!(
                    identifier = %identifier,
                    key = %object.key,
                    error = format!("{err:#}"),
                    "Upload failed"
                );
                false
            }
        }
    }

    /// Stages `object` and overwrites `entry`'s content in place
    ///
    /// The entry keeps its name and parent folder; updates never relocate a
    /// file even when the object's directory path has changed.
    pub async fn update(&self, object: &SourceObject, entry: &RemoteEntry) -> bool {
        match self.try_update(object, entry).await {
            Ok(()) => {
                debug!(name = %entry.name, key = %object.key, "Updated entry content");
                true
            }
            Err(err) => {
                warn!(
                    name = %entry.name,
                    key = %object.key,
                    error = format!("{err:#}"),
                    "Update failed"
                );
                false
            }
        }
    }

    async fn try_upload(
        &self,
        object: &SourceObject,
        identifier: &str,
        resolver: &mut FolderResolver,
    ) -> Result<()> {
        let staged = self.stage(&object.key).await?;

        let (folder_id, file_name) = match self.mode {
            AddressingMode::Hierarchical => {
                let (dir_path, file_name) = split_identifier(identifier);
                let folder_id = resolver.resolve(dir_path).await?;
                (folder_id, file_name)
            }
            AddressingMode::Flattened => (self.dest.root_folder_id().to_string(), identifier),
        };

        let new_id = self
            .dest
            .create_file(staged.path(), file_name, &folder_id)
            .await
            .context("Destination create failed")?;
        if new_id.is_empty() {
            bail!("Destination returned an empty id for '{file_name}'");
        }

        discard(staged);
        Ok(())
    }

    async fn try_update(&self, object: &SourceObject, entry: &RemoteEntry) -> Result<()> {
        let staged = self.stage(&object.key).await?;

        self.dest
            .update_file(&entry.id, staged.path())
            .await
            .context("Destination update failed")?;

        discard(staged);
        Ok(())
    }

    /// Downloads `key` into a fresh staging file
    ///
    /// A download failure aborts the item before any destination call is
    /// attempted; the staging file is removed by its handle either way.
    async fn stage(&self, key: &str) -> Result<NamedTempFile> {
        let staged = NamedTempFile::new().context("Failed to create staging file")?;
        self.source
            .download_to(key, staged.path())
            .await
            .with_context(|| format!("Failed to download '{key}' for staging"))?;
        Ok(staged)
    }
}

/// Removes a staging file, downgrading cleanup failures to a warning
fn discard(staged: NamedTempFile) {
    if let Err(err) = staged.close() {
        warn!(error = %err, "Failed to remove staging file");
    }
}
