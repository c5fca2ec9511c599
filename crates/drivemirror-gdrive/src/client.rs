//! Google Drive v3 API client
//!
//! Provides a typed HTTP client for the Drive endpoints the destination
//! store needs. Handles bearer authentication, JSON deserialization, listing
//! pagination, and status-code classification into [`DriveError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use drivemirror_gdrive::auth::StaticTokenProvider;
//! use drivemirror_gdrive::client::DriveClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = DriveClient::new(Arc::new(StaticTokenProvider::new("access-token")));
//! let children = client.list_children("root-folder-id").await?;
//! println!("{} entries", children.len());
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::auth::ITokenProvider;
use crate::DriveError;

/// Base URL for Drive v3 metadata endpoints
const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Base URL for Drive v3 content upload endpoints
const UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/drive/v3";

/// MIME type Drive uses to mark folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Maximum page size accepted by `files.list`
const PAGE_SIZE: &str = "1000";

/// Fields requested from `files.list`
const LIST_FIELDS: &str = "nextPageToken, files(id, name, size, mimeType)";

/// Boundary for multipart/related upload bodies
const MULTIPART_BOUNDARY: &str = "drivemirror_boundary";

// ============================================================================
// Drive API response types
// ============================================================================

/// One file or folder as returned by `files.list`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// Drive file id
    pub id: String,
    /// File name
    pub name: String,
    /// Size in bytes; Drive serializes int64 as a JSON string, and folders
    /// carry no size at all
    pub size: Option<String>,
    /// MIME type; identifies folders
    pub mime_type: Option<String>,
}

impl DriveFile {
    /// True when this child is a folder rather than a file
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }

    /// Parsed size, defaulting to 0 when absent or malformed
    pub fn size_bytes(&self) -> u64 {
        self.size
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

/// Response from `files.list`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

/// Response from `files.create` with `fields=id`
#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

// ============================================================================
// DriveClient
// ============================================================================

/// HTTP client for Drive v3 API calls
///
/// Wraps `reqwest::Client` with bearer authentication from an
/// [`ITokenProvider`] and base-URL construction for the two Drive API hosts
/// (metadata and upload).
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for metadata requests
    base_url: String,
    /// Base URL for content upload requests
    upload_base_url: String,
    /// Supplier of bearer tokens
    tokens: Arc<dyn ITokenProvider>,
}

impl DriveClient {
    /// Creates a client against the production Drive endpoints
    pub fn new(tokens: Arc<dyn ITokenProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: DRIVE_BASE_URL.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
            tokens,
        }
    }

    /// Creates a client with custom base URLs (useful for testing)
    pub fn with_base_urls(
        tokens: Arc<dyn ITokenProvider>,
        base_url: impl Into<String>,
        upload_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            upload_base_url: upload_base_url.into(),
            tokens,
        }
    }

    /// Creates an authenticated request builder for the given absolute URL
    async fn request(&self, method: Method, url: String) -> Result<RequestBuilder> {
        let token = self
            .tokens
            .access_token()
            .await
            .context("Failed to obtain access token")?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    /// Lists all direct children of a folder, following pagination
    pub async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let query = format!(
            "'{}' in parents and trashed=false",
            escape_query_value(folder_id)
        );

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::GET, format!("{}/files", self.base_url))
                .await?
                .query(&[
                    ("q", query.as_str()),
                    ("fields", LIST_FIELDS),
                    ("pageSize", PAGE_SIZE),
                ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .context("Failed to send list request")?;
            let page: FileListResponse = ensure_success(response)
                .await?
                .json()
                .await
                .context("Failed to parse list response")?;

            files.extend(page.files);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(folder_id, count = files.len(), "Listed folder children");
        Ok(files)
    }

    /// Creates a file from local content via a multipart/related upload
    ///
    /// Returns the new file's id.
    pub async fn upload_file(
        &self,
        local_path: &Path,
        name: &str,
        parent_id: &str,
    ) -> Result<String> {
        let content = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("Failed to read '{}'", local_path.display()))?;

        let metadata = serde_json::json!({ "name": name, "parents": [parent_id] });
        let body = multipart_related_body(&metadata, &content);

        let response = self
            .request(Method::POST, format!("{}/files", self.upload_base_url))
            .await?
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body)
            .send()
            .await
            .context("Failed to send upload request")?;

        let created: CreatedFile = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse upload response")?;

        info!(name, id = %created.id, parent = parent_id, "Uploaded file");
        Ok(created.id)
    }

    /// Replaces a file's content in place (`uploadType=media`)
    ///
    /// Metadata (name, parents) is untouched.
    pub async fn update_file(&self, file_id: &str, local_path: &Path) -> Result<()> {
        let content = tokio::fs::read(local_path)
            .await
            .with_context(|| format!("Failed to read '{}'", local_path.display()))?;

        let response = self
            .request(
                Method::PATCH,
                format!("{}/files/{}", self.upload_base_url, file_id),
            )
            .await?
            .query(&[("uploadType", "media")])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send()
            .await
            .context("Failed to send update request")?;

        ensure_success(response).await?;
        info!(id = file_id, "Updated file content");
        Ok(())
    }

    /// Permanently deletes a file or folder by id
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, format!("{}/files/{}", self.base_url, file_id))
            .await?
            .send()
            .await
            .context("Failed to send delete request")?;

        ensure_success(response).await?;
        info!(id = file_id, "Deleted file");
        Ok(())
    }

    /// Looks up a folder by name directly under a parent
    pub async fn find_folder(&self, name: &str, parent_id: &str) -> Result<Option<String>> {
        let query = format!(
            "name='{}' and '{}' in parents and mimeType='{}' and trashed=false",
            escape_query_value(name),
            escape_query_value(parent_id),
            FOLDER_MIME_TYPE
        );

        let response = self
            .request(Method::GET, format!("{}/files", self.base_url))
            .await?
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .context("Failed to send folder lookup request")?;

        let page: FileListResponse = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse folder lookup response")?;

        let folder_id = page.files.into_iter().next().map(|f| f.id);
        debug!(name, parent = parent_id, found = folder_id.is_some(), "Folder lookup");
        Ok(folder_id)
    }

    /// Creates a folder under a parent, returning its id
    pub async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String> {
        let body = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id],
        });

        let response = self
            .request(Method::POST, format!("{}/files", self.base_url))
            .await?
            .query(&[("fields", "id")])
            .json(&body)
            .send()
            .await
            .context("Failed to send folder create request")?;

        let created: CreatedFile = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse folder create response")?;

        info!(name, id = %created.id, parent = parent_id, "Created folder");
        Ok(created.id)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Builds a multipart/related body: JSON metadata part, then the media part
fn multipart_related_body(metadata: &serde_json::Value, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{MULTIPART_BOUNDARY}\r\nContent-Type: application/octet-stream\r\n\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// Escapes a value for embedding in a Drive search query string
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Classifies non-success statuses into [`DriveError`]
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = match status {
        StatusCode::UNAUTHORIZED => DriveError::Unauthorized(body),
        StatusCode::FORBIDDEN => DriveError::Forbidden(body),
        StatusCode::NOT_FOUND => DriveError::NotFound(body),
        StatusCode::TOO_MANY_REQUESTS => DriveError::TooManyRequests(body),
        s if s.is_server_error() => DriveError::ServerError(body),
        _ => DriveError::Unexpected {
            status: status.as_u16(),
            body,
        },
    };
    Err(anyhow::Error::new(err))
}
