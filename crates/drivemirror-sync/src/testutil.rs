//! In-memory port implementations shared by the unit tests in this crate
//!
//! Both stores record enough call bookkeeping to assert on remote-call
//! amortization, and both can be told to fail specific operations so the
//! failure-isolation behavior of the engine is testable without a network.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use drivemirror_core::domain::{RemoteEntry, SourceObject};
use drivemirror_core::ports::{IDestinationStore, ISourceStore};

/// Root folder id used by [`MemoryDestStore`]
pub(crate) const ROOT_ID: &str = "root";

// ---------------------------------------------------------------------------
// MemorySourceStore
// ---------------------------------------------------------------------------

/// Source store backed by a key → content map
#[derive(Default)]
pub(crate) struct MemorySourceStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_downloads: Mutex<HashSet<String>>,
    fail_listing: Mutex<bool>,
}

impl MemorySourceStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put(&self, key: &str, content: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), content.to_vec());
    }

    pub(crate) fn remove(&self, key: &str) {
        self.objects.lock().unwrap().remove(key);
    }

    /// Makes every later `download_to` for `key` fail
    pub(crate) fn fail_download(&self, key: &str) {
        self.fail_downloads.lock().unwrap().insert(key.to_string());
    }

    /// Makes every later `list_objects` fail
    pub(crate) fn fail_listing(&self) {
        *self.fail_listing.lock().unwrap() = true;
    }
}

#[async_trait::async_trait]
impl ISourceStore for MemorySourceStore {
    async fn list_objects(&self) -> Result<Vec<SourceObject>> {
        if *self.fail_listing.lock().unwrap() {
            bail!("simulated source listing failure");
        }
        let objects = self.objects.lock().unwrap();
        let mut listing: Vec<SourceObject> = objects
            .iter()
            .map(|(key, content)| SourceObject {
                key: key.clone(),
                size: content.len() as u64,
                last_modified: Utc::now(),
                etag: format!("etag-{}", content.len()),
            })
            .collect();
        listing.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(listing)
    }

    async fn download_to(&self, key: &str, local_path: &Path) -> Result<()> {
        if self.fail_downloads.lock().unwrap().contains(key) {
            bail!("simulated download failure for {key}");
        }
        let content = self
            .objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .with_context(|| format!("no such object: {key}"))?;
        std::fs::write(local_path, content)?;
        Ok(())
    }

    async fn upload_from(&self, local_path: &Path, key: &str) -> Result<()> {
        let content = std::fs::read(local_path)?;
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), content);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(key)
            .with_context(|| format!("no such object: {key}"))?;
        Ok(())
    }

    async fn object_exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }
}

// ---------------------------------------------------------------------------
// MemoryDestStore
// ---------------------------------------------------------------------------

struct EntryRec {
    name: String,
    parent: String,
    size: u64,
}

struct FolderRec {
    name: String,
    parent: String,
}

#[derive(Default)]
struct DestState {
    entries: HashMap<String, EntryRec>,
    folders: HashMap<String, FolderRec>,
    next_id: u64,
    find_folder_calls: u64,
    create_folder_calls: u64,
    fail_listing: bool,
    fail_create_names: HashSet<String>,
    empty_id_names: HashSet<String>,
    fail_update_ids: HashSet<String>,
    fail_delete_ids: HashSet<String>,
}

impl DestState {
    fn alloc_id(&mut self) -> String {
        self.next_id += 1;
        format!("id-{}", self.next_id)
    }
}

/// Destination store backed by flat entry/folder tables
#[derive(Default)]
pub(crate) struct MemoryDestStore {
    state: Mutex<DestState>,
}

impl MemoryDestStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Places an entry directly under the root folder
    pub(crate) fn seed_entry(&self, id: &str, name: &str, size: u64) {
        self.state.lock().unwrap().entries.insert(
            id.to_string(),
            EntryRec {
                name: name.to_string(),
                parent: ROOT_ID.to_string(),
                size,
            },
        );
    }

    pub(crate) fn entries_under(&self, parent_id: &str) -> Vec<RemoteEntry> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<RemoteEntry> = state
            .entries
            .iter()
            .filter(|(_, rec)| rec.parent == parent_id)
            .map(|(id, rec)| RemoteEntry {
                id: id.clone(),
                name: rec.name.clone(),
                size: rec.size,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub(crate) fn folder_id(&self, name: &str, parent_id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .folders
            .iter()
            .find(|(_, rec)| rec.name == name && rec.parent == parent_id)
            .map(|(id, _)| id.clone())
    }

    pub(crate) fn find_folder_calls(&self) -> u64 {
        self.state.lock().unwrap().find_folder_calls
    }

    pub(crate) fn create_folder_calls(&self) -> u64 {
        self.state.lock().unwrap().create_folder_calls
    }

    pub(crate) fn fail_listing(&self) {
        self.state.lock().unwrap().fail_listing = true;
    }

    /// Makes `create_file` fail for the given name
    pub(crate) fn fail_create(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_create_names
            .insert(name.to_string());
    }

    /// Makes `create_file` return an empty id for the given name
    pub(crate) fn return_empty_id(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .empty_id_names
            .insert(name.to_string());
    }

    pub(crate) fn fail_update(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_update_ids
            .insert(id.to_string());
    }

    pub(crate) fn fail_delete(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_delete_ids
            .insert(id.to_string());
    }
}

#[async_trait::async_trait]
impl IDestinationStore for MemoryDestStore {
    fn root_folder_id(&self) -> &str {
        ROOT_ID
    }

    async fn list_entries(&self) -> Result<Vec<RemoteEntry>> {
        if self.state.lock().unwrap().fail_listing {
            bail!("simulated destination listing failure");
        }
        // First-level only, like the real adapter.
        Ok(self.entries_under(ROOT_ID))
    }

    async fn create_file(
        &self,
        local_path: &Path,
        name: &str,
        parent_id: &str,
    ) -> Result<String> {
        let size = std::fs::metadata(local_path)?.len();
        let mut state = self.state.lock().unwrap();
        if state.fail_create_names.contains(name) {
            bail!("simulated create failure for {name}");
        }
        if state.empty_id_names.contains(name) {
            return Ok(String::new());
        }
        let id = state.alloc_id();
        state.entries.insert(
            id.clone(),
            EntryRec {
                name: name.to_string(),
                parent: parent_id.to_string(),
                size,
            },
        );
        Ok(id)
    }

    async fn update_file(&self, id: &str, local_path: &Path) -> Result<()> {
        let size = std::fs::metadata(local_path)?.len();
        let mut state = self.state.lock().unwrap();
        if state.fail_update_ids.contains(id) {
            bail!("simulated update failure for {id}");
        }
        let entry = state
            .entries
            .get_mut(id)
            .with_context(|| format!("no such entry: {id}"))?;
        entry.size = size;
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_delete_ids.contains(id) {
            bail!("simulated delete failure for {id}");
        }
        state
            .entries
            .remove(id)
            .with_context(|| format!("no such entry: {id}"))?;
        Ok(())
    }

    async fn find_folder(&self, name: &str, parent_id: &str) -> Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        state.find_folder_calls += 1;
        Ok(state
            .folders
            .iter()
            .find(|(_, rec)| rec.name == name && rec.parent == parent_id)
            .map(|(id, _)| id.clone()))
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.create_folder_calls += 1;
        let id = state.alloc_id();
        state.folders.insert(
            id.clone(),
            FolderRec {
                name: name.to_string(),
                parent: parent_id.to_string(),
            },
        );
        Ok(id)
    }
}
