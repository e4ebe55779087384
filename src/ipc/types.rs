use serde::Deserialize;

use crate::attendance::{AttendanceStore, Recognizer};
use crate::chat::ChatClient;
use crate::roster;
use crate::tasks::{TaskStore, User};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub users: Vec<User>,
    pub tasks: TaskStore,
    pub attendance: AttendanceStore,
    pub chat: ChatClient,
}

impl AppState {
    /// Fresh in-memory state with the demo rosters. Everything here is
    /// volatile and gone when the process exits.
    pub fn seeded(recognizer: Box<dyn Recognizer>, chat: ChatClient) -> AppState {
        let users = roster::sample_users();
        let tasks = TaskStore::with_tasks(roster::sample_tasks(&users));
        let attendance = AttendanceStore::new(roster::sample_students(), recognizer);
        AppState {
            users,
            tasks,
            attendance,
            chat,
        }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
