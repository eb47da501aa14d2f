#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use gatelog_archiver::models::{LogRecord, OperationStatus, OperationType, Row};
use std::env;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

/// 2024-01-02 10:00:00 UTC
pub const TS_2024_01_02_10H: i64 = 1_704_189_600;
pub const HOUR: i64 = 3_600;

/// Environment variables that must not leak from the host into CLI tests.
pub const CONFIG_ENV: [&str; 12] = [
    "PALGATE_SERVER_ADDRESS",
    "PALGATE_GATE_ID",
    "PALGATE_AUTH_TOKEN",
    "GATELOG_TIMEZONE",
    "GATELOG_HTTP_TIMEOUT_SECS",
    "GATELOG_ARCHIVE_BACKEND",
    "GATELOG_SPREADSHEET_ID",
    "GATELOG_SHEET_NAME",
    "GATELOG_SHEET_ID",
    "GATELOG_SHEETS_TOKEN",
    "GATELOG_SHEETS_API_BASE",
    "GATELOG_CSV_PATH",
];

pub fn gatelog() -> Command {
    let mut cmd = cargo_bin_cmd!("gatelog");
    for key in CONFIG_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Unique path inside the system temp dir; any existing file is removed.
pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("gatelog_{}.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

pub fn record(user_id: &str, timestamp: i64) -> LogRecord {
    LogRecord {
        user_id: user_id.to_string(),
        status: OperationStatus::Success,
        timestamp,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        image: false,
        reason: 0,
        kind: OperationType::Dial,
        serial_number: "SN1".to_string(),
    }
}

pub fn row(date: &str, time: &str, user_id: &str) -> Row {
    Row {
        date: date.to_string(),
        time: time.to_string(),
        kind: "Dial".to_string(),
        status: "Success".to_string(),
        serial: "SN1".to_string(),
        user_id: user_id.to_string(),
        last_name: "Doe".to_string(),
        first_name: "Jane".to_string(),
    }
}

pub fn cells(values: [&str; 8]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// JSON body of a successful `/v1/bt/user/log` response.
pub fn log_response_json(records: &[(&str, i64)]) -> String {
    let log: Vec<String> = records
        .iter()
        .map(|(user, ts)| {
            format!(
                r#"{{"userId":"{user}","operation":"sr1","time":{ts},"firstname":"Jane","lastname":"Doe","image":false,"reason":0,"type":1,"sn":"SN1"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"log":[{}],"err":"","msg":"","status":"ok"}}"#,
        log.join(",")
    )
}

/// Config file for a CSV-backed archive with UTC timestamps.
pub fn write_csv_config(path: &PathBuf, csv_path: &PathBuf) {
    let yaml = format!(
        "gate_id: gate-1\nauth_token: secret-token\ntimezone: utc\narchive:\n  backend: csv\n  csv_path: {}\n",
        csv_path.display()
    );
    fs::write(path, yaml).expect("write config");
}

/// Serve `responses` (status, body) to consecutive connections on a local
/// port. The join handle yields every raw request received.
pub fn stub_server(responses: Vec<(u16, String)>) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("local addr");

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().expect("accept");
            requests.push(read_request(&mut stream));

            let reply = format!(
                "HTTP/1.1 {status} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).expect("write reply");
            stream.flush().ok();
        }
        requests
    });

    (format!("http://{addr}"), handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read request");
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).to_string()
}
