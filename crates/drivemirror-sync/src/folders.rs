//! Destination folder path resolution with memoization
//!
//! Resolving a directory path like `reports/2026` means walking its segments
//! left to right, looking up or creating one folder per segment under the
//! previous one. Uncached, that costs one or two remote round-trips per
//! segment, so the resolver memoizes resolved paths on the full path string:
//! every file under the same directory costs one walk per engine lifetime,
//! not one per file.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use drivemirror_core::domain::PATH_SEPARATOR;
use drivemirror_core::ports::IDestinationStore;

/// Resolves directory paths to destination folder ids, creating missing
/// folders on demand
///
/// The cache is never invalidated while a pass runs: if a resolved folder is
/// deleted remotely mid-pass, uploads into it fail and are counted as
/// per-item errors. Callers that want a cold resolver between passes use
/// [`clear_cache`](FolderResolver::clear_cache).
pub struct FolderResolver {
    store: Arc<dyn IDestinationStore>,
    cache: HashMap<String, String>,
}

impl FolderResolver {
    pub fn new(store: Arc<dyn IDestinationStore>) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    /// Returns the folder id for `path`, creating missing folders on the way
    ///
    /// The empty path addresses the pre-configured root folder and costs no
    /// remote call and no cache entry. Doubled separators are tolerated;
    /// empty segments are skipped.
    pub async fn resolve(&mut self, path: &str) -> Result<String> {
        if path.is_empty() {
            return Ok(self.store.root_folder_id().to_string());
        }

        if let Some(folder_id) = self.cache.get(path) {
            return Ok(folder_id.clone());
        }

        let mut current_parent = self.store.root_folder_id().to_string();
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            current_parent = self.find_or_create(segment, &current_parent).await?;
        }

        debug!(path, folder_id = %current_parent, "Resolved destination folder");
        self.cache.insert(path.to_string(), current_parent.clone());
        Ok(current_parent)
    }

    async fn find_or_create(&self, name: &str, parent_id: &str) -> Result<String> {
        if let Some(folder_id) = self
            .store
            .find_folder(name, parent_id)
            .await
            .with_context(|| format!("Failed to look up folder '{name}'"))?
        {
            return Ok(folder_id);
        }

        self.store
            .create_folder(name, parent_id)
            .await
            .with_context(|| format!("Failed to create folder '{name}'"))
    }

    /// Number of memoized paths
    pub fn cached_paths(&self) -> usize {
        self.cache.len()
    }

    /// Drops all memoized folder ids; the next resolution walks remotely again
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
