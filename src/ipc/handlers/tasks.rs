use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::tasks::{self, Priority, Tab, TaskDraft};
use serde_json::json;

fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

fn optional_str(req: &Request, key: &str) -> Option<String> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}

fn required_title(req: &Request) -> Result<String, serde_json::Value> {
    let title = required_str(req, "title")?.trim().to_string();
    if title.is_empty() {
        return Err(err(&req.id, "bad_params", "title must not be empty", None));
    }
    Ok(title)
}

fn known_user(state: &AppState, req: &Request) -> Result<String, serde_json::Value> {
    let user_id = required_str(req, "userId")?;
    if state.user(&user_id).is_none() {
        return Err(err(&req.id, "not_found", "user not found", None));
    }
    Ok(user_id)
}

fn handle_users_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "users": &state.users }))
}

/// Role projection, then search, then tab filter; stats describe the
/// filtered view the caller is about to render.
fn handle_tasks_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let user_id = match required_str(req, "userId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(user) = state.user(&user_id) else {
        return err(&req.id, "not_found", "user not found", None);
    };
    let tab = match req.params.get("tab").and_then(|v| v.as_str()) {
        None => Tab::All,
        Some(raw) => match Tab::parse(raw) {
            Some(t) => t,
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "tab must be one of: all, active, completed, high",
                    Some(json!({ "tab": raw })),
                )
            }
        },
    };
    let search = req.params.get("search").and_then(|v| v.as_str()).unwrap_or("");

    let visible = tasks::visible_to(state.tasks.tasks(), user);
    let filtered = tasks::filter_by_tab(tasks::filter_by_search(visible, search), tab);
    let stats = tasks::stats(&filtered);
    ok(&req.id, json!({ "tasks": filtered, "stats": stats }))
}

fn handle_tasks_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let title = match required_title(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let user_id = match known_user(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let task = state.tasks.add(&title, &user_id);
    ok(&req.id, json!({ "task": task }))
}

fn handle_tasks_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let title = match required_title(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let user_id = match known_user(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let priority = match req.params.get("priority").and_then(|v| v.as_str()) {
        None => None,
        Some(raw) => match Priority::parse(raw) {
            Some(p) => Some(p),
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "priority must be one of: low, medium, high",
                    Some(json!({ "priority": raw })),
                )
            }
        },
    };
    let draft = TaskDraft {
        description: optional_str(req, "description"),
        due_date: optional_str(req, "dueDate"),
        priority,
        assigned_to: optional_str(req, "assignedTo"),
        category: optional_str(req, "category"),
    };
    let task = state.tasks.assign(&title, &user_id, draft);
    ok(&req.id, json!({ "task": task }))
}

fn handle_tasks_complete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let task_id = match required_str(req, "taskId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(completed) = req.params.get("completed").and_then(|v| v.as_bool()) else {
        return err(&req.id, "bad_params", "missing completed", None);
    };
    // Unknown ids are a no-op, not an error; the list view may be stale.
    let updated = state.tasks.set_completed(&task_id, completed);
    ok(&req.id, json!({ "updated": updated }))
}

fn handle_tasks_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let task_id = match required_str(req, "taskId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let deleted = state.tasks.delete(&task_id);
    ok(&req.id, json!({ "deleted": deleted }))
}

fn handle_tasks_rename(state: &mut AppState, req: &Request) -> serde_json::Value {
    let task_id = match required_str(req, "taskId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match required_str(req, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // A blank title is a discarded edit, reported as updated:false.
    let updated = state.tasks.rename(&task_id, &title);
    ok(&req.id, json!({ "updated": updated }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.list" => Some(handle_users_list(state, req)),
        "tasks.list" => Some(handle_tasks_list(state, req)),
        "tasks.add" => Some(handle_tasks_add(state, req)),
        "tasks.assign" => Some(handle_tasks_assign(state, req)),
        "tasks.complete" => Some(handle_tasks_complete(state, req)),
        "tasks.delete" => Some(handle_tasks_delete(state, req)),
        "tasks.rename" => Some(handle_tasks_rename(state, req)),
        _ => None,
    }
}
