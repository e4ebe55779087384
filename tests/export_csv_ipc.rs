use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==";

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar(recognized: &str) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_portald");
    let mut child = Command::new(exe)
        .env("PORTALD_RECOGNIZED_FACES", recognized)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn portald");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value["error"]["message"].as_str().unwrap_or("unknown error")
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn export_lists_present_rows_before_absent_rows() {
    // 2 of 5 recognized: roster order gives 2 present rows then 3 absent.
    let (mut child, mut stdin, mut reader) = spawn_sidecar("2");

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "attendance.createSession",
        json!({ "name": "Weekly General Meeting" }),
    );
    let session_id = created["session"]["id"].as_str().expect("id").to_string();

    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "attendance.uploadPhoto",
        json!({ "sessionId": session_id, "imageData": PNG_DATA_URL }),
    );

    let out_dir = temp_dir("portald-export");
    let out_path = out_dir.join("report.csv");
    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "attendance.exportCsv",
        json!({ "sessionId": session_id, "outPath": out_path.to_string_lossy() }),
    );

    assert_eq!(
        exported["filename"].as_str(),
        Some("attendance_Weekly_General_Meeting.csv")
    );
    assert_eq!(exported["presentRows"].as_u64(), Some(2));
    assert_eq!(exported["absentRows"].as_u64(), Some(3));

    let content = exported["content"].as_str().expect("content");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 7, "title + header + 5 data rows");
    assert!(lines[0].starts_with("Attendance for: Weekly General Meeting - "));
    assert_eq!(lines[1], "Name,Roll Number,Status");
    for line in &lines[2..4] {
        assert!(line.ends_with(",Present"), "expected present row: {}", line);
    }
    for line in &lines[4..7] {
        assert!(line.ends_with(",Absent"), "expected absent row: {}", line);
    }

    // outPath writes the same bytes to disk.
    let on_disk = std::fs::read_to_string(&out_path).expect("read exported file");
    assert_eq!(on_disk, content);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn export_of_untouched_session_is_all_absent() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar("1");

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "attendance.createSession",
        json!({ "name": "Ghost Town" }),
    );
    let session_id = created["session"]["id"].as_str().expect("id").to_string();

    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "attendance.exportCsv",
        json!({ "sessionId": session_id }),
    );
    assert_eq!(exported["presentRows"].as_u64(), Some(0));
    assert_eq!(exported["absentRows"].as_u64(), Some(5));
    let content = exported["content"].as_str().expect("content");
    assert_eq!(content.matches(",Absent").count(), 5);
    assert_eq!(content.matches(",Present").count(), 0);

    drop(stdin);
    let _ = child.wait();
}
