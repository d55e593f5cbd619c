use std::time::Duration;

use ditto_slack::{
    Attachment, ClientConfig, Divider, Error, FileType, Header, Message, SlackClient,
    UploadStage,
};
use httpmock::prelude::*;
use serde_json::json;

fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.url("/api/"),
        max_retry_attempts: 2,
        backoff_unit: Duration::from_millis(1),
        share_uploads: false,
    }
}

#[tokio::test]
async fn integration_send_over_http() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::start();
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat.postMessage")
            .header("authorization", "Bearer xoxb-test")
            .header("content-type", "application/json; charset=utf-8")
            .json_body(json!({
                "channel": "C1",
                "thread_ts": "1.1",
                "ts": "1.1",
                "blocks": [
                    { "type": "header", "text": { "type": "plain_text", "text": "Hi" } },
                    { "type": "divider" }
                ]
            }));
        then.status(200).json_body(json!({
            "ok": true,
            "channel": "C1",
            "ts": "1.2"
        }));
    });

    let client = SlackClient::with_config(Some("xoxb-test".to_string()), test_config(&server))
        .expect("client");
    let message = Message::builder("C1")
        .ts("1.1")
        .block(Header::new("Hi"))
        .block(Divider)
        .build();

    let meta = client.send(&message).await.expect("message is posted");
    assert_eq!(meta.timestamp.as_deref(), Some("1.2"));
    post.assert();
}

#[tokio::test]
async fn integration_server_errors_are_retried() {
    let server = MockServer::start();
    let post = server.mock(|when, then| {
        when.method(POST).path("/api/chat.postMessage");
        then.status(502).body("bad gateway");
    });

    let client = SlackClient::with_config(Some("xoxb-test".to_string()), test_config(&server))
        .expect("client");
    let message = Message::builder("C1").block(Divider).build();

    match client.send(&message).await {
        Err(Error::RequestFailed { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(post.hits(), 3);
}

#[tokio::test]
async fn integration_upload_then_post() {
    let server = MockServer::start();
    let start = server.mock(|when, then| {
        when.method(POST)
            .path("/api/files.getUploadURLExternal")
            .query_param("filename", "people.csv")
            .query_param("length", "9");
        then.status(200).json_body(json!({
            "ok": true,
            "upload_url": server.url("/upload/F1"),
            "file_id": "F1"
        }));
    });
    let transfer = server.mock(|when, then| {
        when.method(POST)
            .path("/upload/F1")
            .header("content-type", "text/csv")
            .body("name\nJohn");
        then.status(200).body("OK - 9");
    });
    let complete = server.mock(|when, then| {
        when.method(POST)
            .path("/api/files.completeUploadExternal")
            .json_body(json!({ "files": [{ "id": "F1", "title": "People" }] }));
        then.status(200).json_body(json!({
            "ok": true,
            "files": [{ "id": "F1", "title": "People", "permalink": "https://team.slack.com/files/F1" }]
        }));
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat.postMessage")
            .json_body(json!({
                "channel": "C1",
                "blocks": [],
                "attachments": [{
                    "title": "People",
                    "file_url": "https://team.slack.com/files/F1",
                    "filename": "people.csv",
                    "filetype": "csv"
                }]
            }));
        then.status(200).json_body(json!({ "ok": true, "ts": "2.1" }));
    });

    let client = SlackClient::with_config(Some("xoxb-test".to_string()), test_config(&server))
        .expect("client");
    let message = Message::builder("C1")
        .attachment(
            Attachment::csv_data(&b"name\nJohn"[..], Some("people.csv".to_string()))
                .with_title("People"),
        )
        .build();

    let meta = client.send(&message).await.expect("message is posted");
    assert_eq!(meta.timestamp.as_deref(), Some("2.1"));

    start.assert();
    transfer.assert();
    complete.assert();
    post.assert();
}

#[tokio::test]
async fn integration_upload_rejected() {
    let server = MockServer::start();
    let start = server.mock(|when, then| {
        when.method(POST).path("/api/files.getUploadURLExternal");
        then.status(200)
            .json_body(json!({ "ok": false, "error": "not_authed" }));
    });

    let client = SlackClient::with_config(Some("xoxb-test".to_string()), test_config(&server))
        .expect("client");
    let message = Message::builder("C1")
        .attachment(Attachment::file_data(&b"x"[..], "x.txt", FileType::Txt))
        .build();

    let err = client.send(&message).await.expect_err("upload fails");
    assert_eq!(err.upload_stage(), Some(UploadStage::GetUploadUrl));
    assert_eq!(start.hits(), 1);
}
