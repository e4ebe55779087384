use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::validate;
use serde_json::json;

fn required_email(req: &Request) -> Result<String, serde_json::Value> {
    req.params
        .get("email")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", "missing email", None))
}

// Validation outcomes are data, not error envelopes: the form renders them
// inline next to the field.
fn handle_login_email(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let email = match required_email(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    ok(&req.id, json!(validate::login_email(&email)))
}

fn handle_reset_email(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let email = match required_email(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    ok(&req.id, json!(validate::reset_email(&email)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "validate.loginEmail" => Some(handle_login_email(state, req)),
        "validate.resetEmail" => Some(handle_reset_email(state, req)),
        _ => None,
    }
}
