//! Drivemirror GDrive - Google Drive destination adapter
//!
//! Provides the async client and port implementation for the Drive v3 API:
//! - OAuth2 token refresh from a long-lived refresh token
//! - Folder listing with pagination
//! - Multipart create, media update, delete
//! - Folder lookup and creation for hierarchical placement
//!
//! ## Modules
//!
//! - [`auth`] - Token providers (refresh-token exchange, static tokens)
//! - [`client`] - Drive v3 HTTP client
//! - [`provider`] - [`IDestinationStore`](drivemirror_core::ports::IDestinationStore) implementation

pub mod auth;
pub mod client;
pub mod provider;

use thiserror::Error;

/// Errors that can occur when communicating with the Drive API
///
/// Classified from HTTP status families; the raw response body is carried
/// for log context.
#[derive(Debug, Error)]
pub enum DriveError {
    /// Authentication credentials are invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested file or folder does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Any other non-success status
    #[error("Unexpected status {status}: {body}")]
    Unexpected {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated by the server
        body: String,
    },
}
