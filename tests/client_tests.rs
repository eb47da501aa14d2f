mod common;
use common::{TS_2024_01_02_10H, log_response_json, stub_server, temp_path};
use gatelog_archiver::client::{FileSource, LogSource, PalGateClient, ResponseStatus};
use gatelog_archiver::core::ArchiveLogic;
use gatelog_archiver::errors::AppError;
use std::fs;

fn client(base: &str) -> PalGateClient {
    PalGateClient::new(base, "gate-42", "tok-123", None).expect("build client")
}

#[test]
fn test_fetch_log_sends_gate_id_and_token() {
    let body = log_response_json(&[("U1", TS_2024_01_02_10H), ("U2", TS_2024_01_02_10H + 60)]);
    let (base, server) = stub_server(vec![(200, body)]);

    let response = client(&base).fetch_log().expect("fetch");
    assert_eq!(response.status, ResponseStatus::Success);
    assert_eq!(response.records.len(), 2);
    assert_eq!(response.records[1].user_id, "U2");

    let requests = server.join().unwrap();
    let req = requests[0].to_lowercase();
    assert!(req.starts_with("get /v1/bt/user/log?id=gate-42 "), "{req}");
    assert!(req.contains("x-bt-user-token: tok-123"), "{req}");
}

#[test]
fn test_http_error_status_is_source_error() {
    let (base, server) = stub_server(vec![(500, "{}".to_string())]);

    let err = client(&base).fetch_log().unwrap_err();
    assert!(matches!(err, AppError::Source(_)), "got {err:?}");
    assert!(err.to_string().contains("500"));
    server.join().unwrap();
}

#[test]
fn test_undecodable_body_is_source_error() {
    let (base, server) = stub_server(vec![(200, "<html>".to_string())]);

    let err = client(&base).fetch_log().unwrap_err();
    assert!(matches!(err, AppError::Source(_)));
    server.join().unwrap();
}

#[test]
fn test_failed_status_is_rejected_by_pipeline() {
    let body = r#"{"log":[],"err":"unauthorized","msg":"bad token","status":"failed"}"#;
    let (base, server) = stub_server(vec![(200, body.to_string())]);

    let c = client(&base);
    let err = ArchiveLogic::fetch(&c).unwrap_err();
    assert!(matches!(err, AppError::Source(_)));
    let msg = err.to_string();
    assert!(msg.contains("status=failed"), "{msg}");
    assert!(msg.contains("bad token"), "{msg}");
    server.join().unwrap();
}

#[test]
fn test_unknown_status_value_is_not_success() {
    let body = r#"{"status":"maintenance"}"#;
    let response: gatelog_archiver::client::GetLogResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.status, ResponseStatus::Unknown);
    assert!(response.ensure_success().is_err());
}

#[test]
fn test_server_address_without_scheme_uses_https() {
    let c = PalGateClient::new("api1.pal-es.com/", "g", "t", None).unwrap();
    assert_eq!(c.log_url(), "https://api1.pal-es.com/v1/bt/user/log");
}

#[test]
fn test_empty_server_address_is_rejected() {
    assert!(matches!(
        PalGateClient::new("  ", "g", "t", None),
        Err(AppError::Config(_))
    ));
}

#[test]
fn test_file_source_replays_saved_response() {
    let path = temp_path("client_file_source", "json");
    fs::write(&path, log_response_json(&[("U9", TS_2024_01_02_10H)])).unwrap();

    let records = ArchiveLogic::fetch(&FileSource::new(&path)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, "U9");
}

#[test]
fn test_file_source_missing_file_is_source_error() {
    let path = temp_path("client_file_source_missing", "json");
    let err = FileSource::new(&path).fetch_log().unwrap_err();
    assert!(matches!(err, AppError::Source(_)));
}
