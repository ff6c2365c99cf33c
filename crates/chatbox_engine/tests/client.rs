use std::io::Write;
use std::time::Duration;

use chatbox_engine::{
    AskReply, BackendClient, BackendSettings, FailureKind, ReqwestBackendClient, SourceRef,
    UploadFile,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestBackendClient {
    ReqwestBackendClient::new(BackendSettings::with_base_url(server.uri())).expect("client")
}

fn temp_upload(contents: &str) -> (NamedTempFile, UploadFile) {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    let upload = UploadFile::new("faq.txt", file.path());
    (file, upload)
}

#[tokio::test]
async fn ask_posts_question_and_decodes_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .and(body_string_contains("name=\"question\""))
        .and(body_string_contains("Do you ship abroad?"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"answer":"Yes, within 10 days.","sources":[{"source":"http://shop.example/ship","chunk":2},{"source":"policy.pdf","chunk":0},"faq"]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .ask("Do you ship abroad?")
        .await
        .expect("ask ok");

    assert_eq!(
        reply,
        AskReply {
            answer: "Yes, within 10 days.".to_string(),
            sources: vec![
                SourceRef::Chunk {
                    source: "http://shop.example/ship".to_string(),
                    chunk: 2
                },
                SourceRef::Chunk {
                    source: "policy.pdf".to_string(),
                    chunk: 0
                },
                SourceRef::Label("faq".to_string()),
            ],
        }
    );
}

#[tokio::test]
async fn ask_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).ask("hello").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn ask_rejects_body_without_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).ask("hello").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn ask_fails_when_backend_unreachable() {
    let client = ReqwestBackendClient::new(BackendSettings {
        connect_timeout: Some(Duration::from_millis(500)),
        ..BackendSettings::with_base_url("http://127.0.0.1:1")
    })
    .expect("client");

    let err = client.ask("hello").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}

#[tokio::test]
async fn ask_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"answer":"late"}"#),
        )
        .mount(&server)
        .await;

    let client = ReqwestBackendClient::new(BackendSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..BackendSettings::with_base_url(server.uri())
    })
    .expect("client");

    let err = client.ask("hello").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn upload_sends_file_part_and_reads_chunk_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-file/"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"faq.txt\""))
        .and(body_string_contains("Refunds within 30 days."))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"success","chunks_inserted":7,"message":"Inserted 7 chunks from faq.txt"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (_guard, upload) = temp_upload("Refunds within 30 days.");
    let reply = client_for(&server).upload(upload).await.expect("upload ok");
    assert_eq!(reply.chunks_inserted, 7);
}

#[tokio::test]
async fn upload_error_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-file/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"error","message":"No text could be extracted."}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let (_guard, upload) = temp_upload("");
    let err = client_for(&server).upload(upload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "No text could be extracted.");
}

#[tokio::test]
async fn upload_of_missing_file_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let upload = UploadFile::new("gone.pdf", "/definitely/not/here/gone.pdf");
    let err = client_for(&server).upload(upload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Io);
}
