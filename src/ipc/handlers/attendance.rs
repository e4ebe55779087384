use crate::attendance::AttendanceError;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

fn store_err(req: &Request, e: AttendanceError) -> serde_json::Value {
    let code = match e {
        AttendanceError::SessionNotFound => "not_found",
        AttendanceError::SessionCompleted | AttendanceError::BadImage(_) => "bad_params",
    };
    err(&req.id, code, e.message(), None)
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "students": state.attendance.roster() }))
}

fn handle_sessions(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "sessions": state.attendance.sessions() }))
}

fn handle_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "session": state.attendance.current_session() }))
}

fn handle_create_session(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v.trim().to_string(),
        Err(resp) => return resp,
    };
    if name.is_empty() {
        return err(&req.id, "bad_params", "name must not be empty", None);
    }
    let session = state.attendance.create_session(&name);
    ok(&req.id, json!({ "session": session }))
}

fn handle_upload_photo(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let image_data = match required_str(req, "imageData") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.attendance.upload_photo(&session_id, &image_data) {
        Ok(photo) => {
            let session = state.attendance.session(&session_id);
            ok(&req.id, json!({ "photo": photo, "session": session }))
        }
        Err(e) => store_err(req, e),
    }
}

fn handle_complete_session(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.attendance.complete_session(&session_id) {
        Ok(()) => {
            let session = state.attendance.session(&session_id);
            ok(&req.id, json!({ "session": session }))
        }
        Err(e) => store_err(req, e),
    }
}

fn handle_view_session(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.attendance.view_session(&session_id) {
        Ok(()) => ok(&req.id, json!({ "session": state.attendance.current_session() })),
        Err(e) => store_err(req, e),
    }
}

fn handle_clear_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.attendance.clear_current();
    ok(&req.id, json!({}))
}

fn handle_present_students(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if state.attendance.session(&session_id).is_none() {
        return err(&req.id, "not_found", "session not found", None);
    }
    let students = state.attendance.present_students(&session_id);
    ok(&req.id, json!({ "students": students }))
}

fn handle_absent_students(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session_id = match required_str(req, "sessionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if state.attendance.session(&session_id).is_none() {
        return err(&req.id, "not_found", "session not found", None);
    }
    let students = state.attendance.absent_students(&session_id);
    ok(&req.id, json!({ "students": students }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "attendance.sessions" => Some(handle_sessions(state, req)),
        "attendance.current" => Some(handle_current(state, req)),
        "attendance.createSession" => Some(handle_create_session(state, req)),
        "attendance.uploadPhoto" => Some(handle_upload_photo(state, req)),
        "attendance.completeSession" => Some(handle_complete_session(state, req)),
        "attendance.viewSession" => Some(handle_view_session(state, req)),
        "attendance.clearCurrent" => Some(handle_clear_current(state, req)),
        "attendance.presentStudents" => Some(handle_present_students(state, req)),
        "attendance.absentStudents" => Some(handle_absent_students(state, req)),
        _ => None,
    }
}
