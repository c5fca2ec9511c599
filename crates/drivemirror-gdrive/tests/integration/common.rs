//! Shared test helpers for Drive API integration tests
//!
//! Provides wiremock-based mock server setup for Drive v3 endpoints. Each
//! helper mounts the necessary mock endpoints and returns a configured
//! DriveClient pointing at the mock server. The same server handles both the
//! metadata and upload hosts, since the paths do not overlap.

use std::sync::Arc;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivemirror_gdrive::auth::StaticTokenProvider;
use drivemirror_gdrive::client::DriveClient;

/// Starts a mock server and returns it with a client pointed at it
pub async fn setup_drive_mock() -> (MockServer, DriveClient) {
    let server = MockServer::start().await;
    let client = DriveClient::with_base_urls(
        Arc::new(StaticTokenProvider::new("test-access-token")),
        server.uri(),
        server.uri(),
    );
    (server, client)
}

/// Mounts a single-page `files.list` response for any list query
pub async fn mount_list_single_page(server: &MockServer, files: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": files
        })))
        .mount(server)
        .await;
}

/// Mounts a paginated `files.list`: page 1 carries a nextPageToken, the
/// follow-up request with that token receives page 2.
pub async fn mount_list_paginated(
    server: &MockServer,
    page1_files: serde_json::Value,
    page2_files: serde_json::Value,
    page_token: &str,
) {
    // Page 1: only the first request matches (no pageToken yet).
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": page1_files,
            "nextPageToken": page_token
        })))
        .up_to_n_times(1)
        .mount(server)
        .await;

    // Page 2: the request that echoes the token back.
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("pageToken", page_token))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": page2_files
        })))
        .mount(server)
        .await;
}

/// Mounts a multipart create endpoint returning the given file id
pub async fn mount_upload(server: &MockServer, response_id: &str) {
    Mock::given(method("POST"))
        .and(path("/files"))
        .and(query_param("uploadType", "multipart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": response_id
        })))
        .mount(server)
        .await;
}
