//! Integration tests for content upload, update, and delete

use std::io::Write;

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn staged_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(content).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[tokio::test]
async fn upload_file_sends_multipart_and_returns_id() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .and(body_string_contains("\"name\":\"notes.txt\""))
        .and(body_string_contains("\"parents\":[\"parent-7\"]"))
        .and(body_string_contains("staged file content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "upload-001"
        })))
        .mount(&server)
        .await;

    let staged = staged_file(b"staged file content");
    let file_id = client
        .upload_file(staged.path(), "notes.txt", "parent-7")
        .await
        .expect("upload failed");

    assert_eq!(file_id, "upload-001");
}

#[tokio::test]
async fn upload_of_empty_file_succeeds() {
    let (server, client) = common::setup_drive_mock().await;
    common::mount_upload(&server, "upload-empty").await;

    let staged = staged_file(b"");
    let file_id = client
        .upload_file(staged.path(), "empty.txt", "root-id")
        .await
        .expect("upload failed");

    assert_eq!(file_id, "upload-empty");
}

#[tokio::test]
async fn upload_errors_on_unauthorized() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let staged = staged_file(b"data");
    let result = client.upload_file(staged.path(), "f.txt", "root-id").await;

    let err = result.expect_err("expected failure");
    assert!(format!("{err:#}").contains("Unauthorized"));
}

#[tokio::test]
async fn update_file_patches_content_in_place() {
    let (server, client) = common::setup_drive_mock().await;

    Mock::given(method("PATCH"))
        .and(path("/files/entry-42"))
        .and(body_string_contains("replacement bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "entry-42"
        })))
        .mount(&server)
        .await;

    let staged = staged_file(b"replacement bytes");
    client
        .update_file("entry-42", staged.path())
        .await
        .expect("update failed");
}

#[tokio::test]
async fn update_errors_on_missing_entry() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("PATCH"))
        .and(path("/files/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("file not found"))
        .mount(&server)
        .await;

    let staged = staged_file(b"data");
    let result = client.update_file("gone", staged.path()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn delete_file_issues_a_delete_request() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("DELETE"))
        .and(path("/files/entry-9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_file("entry-9").await.expect("delete failed");
}

#[tokio::test]
async fn delete_errors_on_missing_entry() {
    let (server, client) = common::setup_drive_mock().await;
    Mock::given(method("DELETE"))
        .and(path("/files/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("file not found"))
        .mount(&server)
        .await;

    let result = client.delete_file("missing").await;
    assert!(result.is_err());
}
