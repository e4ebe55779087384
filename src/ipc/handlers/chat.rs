use crate::chat::CHAT_UNAVAILABLE;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_chat_send(state: &mut AppState, req: &Request) -> serde_json::Value {
    let message = match req.params.get("message").and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => return err(&req.id, "bad_params", "missing message", None),
    };
    let language = req
        .params
        .get("language")
        .and_then(|v| v.as_str())
        .unwrap_or("en");

    match state.chat.send(&message, language) {
        Ok(response) => ok(&req.id, json!({ "response": response })),
        Err(e) => {
            log::warn!("chat relay failed: {:#}", e);
            err(&req.id, "chat_unavailable", CHAT_UNAVAILABLE, None)
        }
    }
}

fn handle_chat_ping(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.chat.ping() {
        Ok(()) => ok(&req.id, json!({ "status": "API is working!" })),
        Err(e) => {
            log::warn!("chat ping failed: {:#}", e);
            err(&req.id, "chat_unavailable", CHAT_UNAVAILABLE, None)
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "chat.send" => Some(handle_chat_send(state, req)),
        "chat.ping" => Some(handle_chat_ping(state, req)),
        _ => None,
    }
}
