use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::report;
use serde_json::json;
use std::path::PathBuf;

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

fn handle_export_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(session) = state.attendance.session(&session_id) else {
        return err(&req.id, "not_found", "session not found", None);
    };

    let present = state.attendance.present_students(&session_id);
    let absent = state.attendance.absent_students(&session_id);
    let content = match report::build_report(session, &present, &absent) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "io_failed", e.to_string(), None),
    };
    let filename = report::report_filename(&session.name);

    if let Some(out) = req.params.get("outPath").and_then(|v| v.as_str()) {
        let path = PathBuf::from(out);
        if let Err(e) = report::write_report(&path, &content) {
            return err(
                &req.id,
                "io_failed",
                e.to_string(),
                Some(json!({ "path": out })),
            );
        }
    }

    ok(
        &req.id,
        json!({
            "filename": filename,
            "content": content,
            "presentRows": present.len(),
            "absentRows": absent.len()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.exportCsv" => Some(handle_export_csv(state, req)),
        _ => None,
    }
}
