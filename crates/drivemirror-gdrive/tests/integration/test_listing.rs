//! Integration tests for folder listing and entry mapping

use drivemirror_core::ports::IDestinationStore;
use drivemirror_gdrive::provider::DriveDestinationStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn list_children_returns_files() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_single_page(
        &server,
        serde_json::json!([
            { "id": "f1", "name": "a.txt", "size": "3", "mimeType": "text/plain" },
            { "id": "f2", "name": "b.txt", "size": "10", "mimeType": "text/plain" }
        ]),
    )
    .await;

    let children = client.list_children("root-id").await.expect("list failed");

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id, "f1");
    assert_eq!(children[0].size_bytes(), 3);
    assert_eq!(children[1].name, "b.txt");
}

#[tokio::test]
async fn list_children_follows_pagination() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_paginated(
        &server,
        serde_json::json!([{ "id": "f1", "name": "page1.txt", "size": "1" }]),
        serde_json::json!([{ "id": "f2", "name": "page2.txt", "size": "2" }]),
        "token-page2",
    )
    .await;

    let children = client.list_children("root-id").await.expect("list failed");

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].name, "page1.txt");
    assert_eq!(children[1].name, "page2.txt");
}

#[tokio::test]
async fn list_children_returns_empty_for_empty_folder() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_single_page(&server, serde_json::json!([])).await;

    let children = client.list_children("root-id").await.expect("list failed");
    assert!(children.is_empty());
}

#[tokio::test]
async fn list_children_errors_on_server_failure() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let result = client.list_children("root-id").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn destination_store_filters_out_folders() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_single_page(
        &server,
        serde_json::json!([
            { "id": "f1", "name": "report.pdf", "size": "900", "mimeType": "application/pdf" },
            { "id": "d1", "name": "archive", "mimeType": "application/vnd.google-apps.folder" }
        ]),
    )
    .await;

    let store = DriveDestinationStore::new(client, "root-id");
    let entries = store.list_entries().await.expect("list failed");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "report.pdf");
    assert_eq!(entries[0].size, 900);
    assert_eq!(store.root_folder_id(), "root-id");
}

#[tokio::test]
async fn destination_store_defaults_missing_sizes_to_zero() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_single_page(
        &server,
        serde_json::json!([
            { "id": "f1", "name": "sizeless.bin", "mimeType": "application/octet-stream" }
        ]),
    )
    .await;

    let store = DriveDestinationStore::new(client, "root-id");
    let entries = store.list_entries().await.expect("list failed");

    assert_eq!(entries[0].size, 0);
}
