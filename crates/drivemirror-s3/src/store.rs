//! S3-backed source store
//!
//! Thin wrapper over an [`opendal::Operator`]: the interesting part is the
//! listing contract, which must hand the engine one [`SourceObject`] per real
//! object. Buckets written through S3 consoles and some sync tools contain
//! directory markers (keys ending in `/`) and zero-byte placeholder objects;
//! both are filtered out here so the engine never tries to mirror them.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use opendal::{services, ErrorKind, Operator};
use tracing::{debug, info};

use drivemirror_core::config::SourceConfig;
use drivemirror_core::domain::{SourceObject, PATH_SEPARATOR};
use drivemirror_core::ports::ISourceStore;

/// Source store over S3-compatible object storage
pub struct S3SourceStore {
    op: Operator,
    bucket: String,
}

impl S3SourceStore {
    /// Builds a store from the source section of the configuration
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut builder = services::S3::default()
            .bucket(&config.bucket)
            .region(&config.region)
            .access_key_id(&config.access_key_id)
            .secret_access_key(&config.secret_access_key);

        if let Some(endpoint) = &config.endpoint {
            info!(endpoint = %endpoint, "Using custom S3 endpoint");
            builder = builder.endpoint(endpoint);
        }

        let op = Operator::new(builder)
            .context("Failed to configure S3 operator")?
            .finish();

        info!(bucket = %config.bucket, "S3 source store initialized");
        Ok(Self {
            op,
            bucket: config.bucket.clone(),
        })
    }

    /// Builds a store over an arbitrary operator
    ///
    /// Lets tests exercise the listing filters against opendal's memory
    /// backend without any network.
    pub fn from_operator(op: Operator, bucket: impl Into<String>) -> Self {
        Self {
            op,
            bucket: bucket.into(),
        }
    }

    /// Directory markers and zero-byte path-bearing placeholders are not
    /// real objects
    fn is_placeholder(key: &str, size: u64) -> bool {
        if key.ends_with(PATH_SEPARATOR) {
            return true;
        }
        size == 0 && key.contains(PATH_SEPARATOR)
    }
}

#[async_trait::async_trait]
impl ISourceStore for S3SourceStore {
    async fn list_objects(&self) -> Result<Vec<SourceObject>> {
        info!(bucket = %self.bucket, "Listing source objects");

        let entries = self
            .op
            .list_with("")
            .recursive(true)
            .metakey(opendal::Metakey::ContentLength | opendal::Metakey::LastModified)
            .await
            .context("Failed to list bucket contents")?;

        let mut objects = Vec::new();
        let mut skipped = 0usize;

        for entry in entries {
            let meta = entry.metadata();
            if meta.mode().is_dir() {
                skipped += 1;
                continue;
            }

            let key = entry.path().to_string();
            let size = meta.content_length();
            if Self::is_placeholder(&key, size) {
                debug!(key = %key, "Skipping directory marker or placeholder");
                skipped += 1;
                continue;
            }

            objects.push(SourceObject {
                key,
                size,
                last_modified: meta.last_modified().unwrap_or_else(Utc::now),
                etag: meta
                    .etag()
                    .unwrap_or_default()
                    .trim_matches('"')
                    .to_string(),
            });
        }

        info!(
            objects = objects.len(),
            skipped, "Source listing complete"
        );
        Ok(objects)
    }

    async fn download_to(&self, key: &str, local_path: &Path) -> Result<()> {
        debug!(key = %key, path = %local_path.display(), "Downloading object");

        let buffer = self
            .op
            .read(key)
            .await
            .with_context(|| format!("Failed to read object '{key}'"))?;

        tokio::fs::write(local_path, buffer.to_bytes())
            .await
            .with_context(|| format!("Failed to write '{}'", local_path.display()))?;

        Ok(())
    }

    async fn upload_from(&self, local_path: &Path, key: &str) -> Result<()> {
        debug!(key = %key, path = %local_path.display(), "Uploading object");

        let content = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("Failed to read '{}'", local_path.display()))?;

        self.op
            .write(key, content)
            .await
            .with_context(|| format!("Failed to write object '{key}'"))?;

        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        debug!(key = %key, "Deleting object");

        self.op
            .delete(key)
            .await
            .with_context(|| format!("Failed to delete object '{key}'"))?;

        Ok(())
    }

    async fn object_exists(&self, key: &str) -> Result<bool> {
        match self.op.stat(key).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| format!("Failed to stat object '{key}'")),
        }
    }
}
