//! Integration tests for folder lookup and creation

use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn find_folder_returns_the_first_match() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param(
            "q",
            "name='docs' and 'root-id' in parents and \
             mimeType='application/vnd.google-apps.folder' and trashed=false",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": [{ "id": "folder-123", "name": "docs" }]
        })))
        .mount(&server)
        .await;

    let found = client.find_folder("docs", "root-id").await.expect("lookup");
    assert_eq!(found.as_deref(), Some("folder-123"));
}

#[tokio::test]
async fn find_folder_returns_none_when_absent() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_list_single_page(&server, serde_json::json!([])).await;

    let found = client.find_folder("missing", "root-id").await.expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn find_folder_escapes_quotes_in_names() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param(
            "q",
            "name='it\\'s docs' and 'root-id' in parents and \
             mimeType='application/vnd.google-apps.folder' and trashed=false",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": []
        })))
        .mount(&server)
        .await;

    let found = client
        .find_folder("it's docs", "root-id")
        .await
        .expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn create_folder_posts_metadata_and_returns_id() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("application/vnd.google-apps.folder"))
        .and(body_string_contains("\"name\":\"reports\""))
        .and(body_string_contains("\"parents\":[\"root-id\"]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "new-folder-id"
        })))
        .mount(&server)
        .await;

    let folder_id = client
        .create_folder("reports", "root-id")
        .await
        .expect("create");
    assert_eq!(folder_id, "new-folder-id");
}

#[tokio::test]
async fn create_folder_errors_on_forbidden() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(403).set_body_string("insufficient permissions"))
        .mount(&server)
        .await;

    let result = client.create_folder("reports", "root-id").await;
    assert!(result.is_err());
}

/// The lookup-then-create sequence the folder resolver performs
#[tokio::test]
async fn lookup_miss_then_create_round_trip() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "made-on-demand"
        })))
        .mount(&server)
        .await;

    let found = client.find_folder("docs", "root-id").await.expect("lookup");
    assert!(found.is_none());

    let created = client.create_folder("docs", "root-id").await.expect("create");
    assert_eq!(created, "made-on-demand");
}
