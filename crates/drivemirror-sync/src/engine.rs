//! Reconciliation engine
//!
//! The [`SyncEngine`] orchestrates one-way convergence of the destination
//! folder onto the source bucket's current file set.
//!
//! ## Pass Flow
//!
//! 1. **Listing**: fetch one full snapshot from each store
//! 2. **Diffing**: partition identifiers into upload / check / delete sets
//! 3. **Applying**: uploads, then update-vs-unchanged checks, then deletes,
//!    strictly sequentially
//! 4. **Done**: return the accumulated [`SyncStats`]
//!
//! Listing failures are the only ones that abort a pass; every later failure
//! is absorbed into the `errors` counter and the pass continues with the
//! next item. Running a pass twice against an unchanged source performs no
//! transfers on the second run.
//!
//! The destination listing covers only direct children of the root folder.
//! In hierarchical mode a file placed inside a subfolder is therefore not
//! matched on later passes and is uploaded again each time; see DESIGN.md
//! for why this behavior is kept.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

use drivemirror_core::domain::{AddressingMode, SyncStats};
use drivemirror_core::ports::{IDestinationStore, ISourceStore};

use crate::differ::{self, SnapshotDiff};
use crate::folders::FolderResolver;
use crate::transfer::TransferExecutor;

/// One-way reconciliation engine
///
/// Owns the folder path cache for its whole lifetime: constructing a new
/// engine starts cold, keeping one across passes reuses resolved folder ids.
/// An engine must not be shared across concurrently running passes; the
/// `&mut self` receiver of [`run_pass`](SyncEngine::run_pass) enforces that
/// for a single engine value.
pub struct SyncEngine {
    source: Arc<dyn ISourceStore>,
    dest: Arc<dyn IDestinationStore>,
    mode: AddressingMode,
    resolver: FolderResolver,
    executor: TransferExecutor,
}

impl SyncEngine {
    /// Creates an engine with a cold folder cache
    ///
    /// The addressing mode is fixed for the engine's lifetime.
    pub fn new(
        source: Arc<dyn ISourceStore>,
        dest: Arc<dyn IDestinationStore>,
        mode: AddressingMode,
    ) -> Self {
        let resolver = FolderResolver::new(Arc::clone(&dest));
        let executor = TransferExecutor::new(Arc::clone(&source), Arc::clone(&dest), mode);
        Self {
            source,
            dest,
            mode,
            resolver,
            executor,
        }
    }

    /// The engine's fixed addressing mode
    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Drops the memoized folder ids so the next pass re-resolves every path
    pub fn clear_folder_cache(&mut self) {
        self.resolver.clear_cache();
    }

    /// Runs one reconciliation pass and returns its outcome counters
    ///
    /// # Errors
    ///
    /// Returns an error only when one of the two listings fails; no stats
    /// are produced in that case. Per-item transfer and delete failures are
    /// reported through the `errors` counter instead.
    #[tracing::instrument(skip(self))]
    pub async fn run_pass(&mut self) -> Result<SyncStats> {
        let pass_id = Uuid::new_v4();
        let start = std::time::Instant::now();

        info!(%pass_id, mode = %self.mode, "Starting reconciliation pass");

        // Listing is the only stage whose failure aborts the pass.
        let objects = self
            .source
            .list_objects()
            .await
            .context("Failed to list source objects")?;
        let entries = self
            .dest
            .list_entries()
            .await
            .context("Failed to list destination entries")?;

        info!(
            source_objects = objects.len(),
            destination_entries = entries.len(),
            "Listings fetched"
        );

        let source_index = differ::build_source_index(objects, self.mode);
        let dest_index = differ::build_dest_index(entries);
        let SnapshotDiff {
            to_upload,
            to_check,
            to_delete,
        } = differ::diff(&source_index, &dest_index);

        info!(
            to_upload = to_upload.len(),
            to_check = to_check.len(),
            to_delete = to_delete.len(),
            "Snapshot diff computed"
        );

        let mut stats = SyncStats::default();

        for identifier in &to_upload {
            let Some(object) = source_index.get(identifier) else {
                continue;
            };
            if self
                .executor
                .upload(object, identifier, &mut self.resolver)
                .await
            {
                stats.uploaded += 1;
            } else {
                stats.errors += 1;
            }
        }

        for identifier in &to_check {
            let (Some(object), Some(entry)) =
                (source_index.get(identifier), dest_index.get(identifier))
            else {
                continue;
            };
            if differ::needs_update(object, entry) {
                debug!(
                    identifier = %identifier,
                    source_size = object.size,
                    destination_size = entry.size,
                    "Size mismatch, updating"
                );
                if self.executor.update(object, entry).await {
                    stats.updated += 1;
                } else {
                    stats.errors += 1;
                }
            } else {
                debug!(identifier = %identifier, "Entry unchanged");
                stats.unchanged += 1;
            }
        }

        for identifier in &to_delete {
            let Some(entry) = dest_index.get(identifier) else {
                continue;
            };
            match self.dest.delete_entry(&entry.id).await {
                Ok(()) => {
                    debug!(identifier = %identifier, id = %entry.id, "Deleted destination entry");
                    stats.deleted += 1;
                }
                Err(err) => {
                    warn!(
                        identifier = %identifier,
                        id = %entry.id,
                        error = format!("{err:#}"),
                        "Delete failed"
                    );
                    stats.errors += 1;
                }
            }
        }

        info!(
            %pass_id,
            %stats,
            duration_ms = start.elapsed().as_millis() as u64,
            "Reconciliation pass completed"
        );

        Ok(stats)
    }
}
