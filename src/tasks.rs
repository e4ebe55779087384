use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Priority> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Permission tiers, lowest to highest. Visibility rules match on this
/// exhaustively so a new role cannot be added without deciding what it sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    General,
    Core,
    Head,
    President,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Optional fields accepted by the assign operation on top of a bare title.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Active,
    Completed,
    High,
}

impl Tab {
    pub fn parse(s: &str) -> Option<Tab> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(Tab::All),
            "active" => Some(Tab::Active),
            "completed" => Some(Tab::Completed),
            "high" => Some(Tab::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high_priority: usize,
}

/// Ordered task collection. New tasks are always prepended so the list reads
/// most-recent-first; no other operation reorders it.
#[derive(Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn with_tasks(tasks: Vec<Task>) -> TaskStore {
        TaskStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, title: &str, assigned_by: &str) -> &Task {
        self.assign(title, assigned_by, TaskDraft::default())
    }

    pub fn assign(&mut self, title: &str, assigned_by: &str, draft: TaskDraft) -> &Task {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: draft.description,
            completed: false,
            created_at: Utc::now().to_rfc3339(),
            due_date: draft.due_date,
            priority: draft.priority,
            assigned_to: draft.assigned_to,
            assigned_by: Some(assigned_by.to_string()),
            category: draft.category,
        };
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Applies the new title only when its trimmed form is non-empty;
    /// a blank edit is discarded without touching the task.
    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = trimmed.to_string();
                true
            }
            None => false,
        }
    }
}

/// Role-based projection: heads and the president see everything, core
/// members see tasks they assigned or were assigned, general members only
/// see tasks assigned to them.
pub fn visible_to<'a>(tasks: &'a [Task], user: &User) -> Vec<&'a Task> {
    match user.role {
        Role::Head | Role::President => tasks.iter().collect(),
        Role::Core => tasks
            .iter()
            .filter(|t| {
                t.assigned_to.as_deref() == Some(user.id.as_str())
                    || t.assigned_by.as_deref() == Some(user.id.as_str())
            })
            .collect(),
        Role::General => tasks
            .iter()
            .filter(|t| t.assigned_to.as_deref() == Some(user.id.as_str()))
            .collect(),
    }
}

pub fn filter_by_search<'a>(tasks: Vec<&'a Task>, query: &str) -> Vec<&'a Task> {
    if query.is_empty() {
        return tasks;
    }
    let needle = query.to_lowercase();
    let matches = |field: &Option<String>| {
        field
            .as_deref()
            .map(|v| v.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };
    tasks
        .into_iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || matches(&t.description)
                || matches(&t.category)
        })
        .collect()
}

pub fn filter_by_tab<'a>(tasks: Vec<&'a Task>, tab: Tab) -> Vec<&'a Task> {
    match tab {
        Tab::All => tasks,
        Tab::Active => tasks.into_iter().filter(|t| !t.completed).collect(),
        Tab::Completed => tasks.into_iter().filter(|t| t.completed).collect(),
        Tab::High => tasks
            .into_iter()
            .filter(|t| t.priority == Some(Priority::High) && !t.completed)
            .collect(),
    }
}

pub fn stats(tasks: &[&Task]) -> TaskStats {
    let mut completed = 0;
    let mut high_priority = 0;
    for t in tasks {
        if t.completed {
            completed += 1;
        } else if t.priority == Some(Priority::High) {
            high_priority += 1;
        }
    }
    TaskStats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
        high_priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            role,
            email: format!("{}@example.org", id),
            position: None,
            profile_image: None,
        }
    }

    fn seeded_store() -> TaskStore {
        let mut store = TaskStore::default();
        store.assign(
            "Draft agenda",
            "head-1",
            TaskDraft {
                assigned_to: Some("core-1".to_string()),
                priority: Some(Priority::High),
                category: Some("Management".to_string()),
                ..TaskDraft::default()
            },
        );
        store.assign(
            "Review homepage PR",
            "core-1",
            TaskDraft {
                assigned_to: Some("gen-1".to_string()),
                priority: Some(Priority::Medium),
                description: Some("New homepage layout".to_string()),
                ..TaskDraft::default()
            },
        );
        store.assign(
            "Book auditorium",
            "head-1",
            TaskDraft {
                assigned_to: Some("core-2".to_string()),
                ..TaskDraft::default()
            },
        );
        store
    }

    #[test]
    fn add_prepends_and_defaults_incomplete() {
        let mut store = seeded_store();
        let id = store.add("Newest", "head-1").id.clone();
        assert_eq!(store.tasks()[0].id, id);
        assert!(!store.tasks()[0].completed);
        assert_eq!(store.tasks()[0].assigned_by.as_deref(), Some("head-1"));
    }

    #[test]
    fn head_and_president_see_everything() {
        let store = seeded_store();
        for role in [Role::Head, Role::President] {
            let seen = visible_to(store.tasks(), &user("nobody", role));
            assert_eq!(seen.len(), store.tasks().len());
        }
    }

    #[test]
    fn core_sees_own_assignments_both_directions() {
        let store = seeded_store();
        let seen = visible_to(store.tasks(), &user("core-1", Role::Core));
        assert_eq!(seen.len(), 2);
        for t in seen {
            assert!(
                t.assigned_to.as_deref() == Some("core-1")
                    || t.assigned_by.as_deref() == Some("core-1")
            );
        }
    }

    #[test]
    fn general_sees_only_tasks_assigned_to_them() {
        let store = seeded_store();
        let seen = visible_to(store.tasks(), &user("gen-1", Role::General));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].assigned_to.as_deref(), Some("gen-1"));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let store = seeded_store();
        let all: Vec<&Task> = store.tasks().iter().collect();
        assert_eq!(filter_by_search(all.clone(), "AGENDA").len(), 1);
        assert_eq!(filter_by_search(all.clone(), "homepage").len(), 1);
        assert_eq!(filter_by_search(all.clone(), "management").len(), 1);
        assert_eq!(filter_by_search(all.clone(), "").len(), 3);
        assert_eq!(filter_by_search(all, "zzz").len(), 0);
    }

    #[test]
    fn high_tab_excludes_completed() {
        let mut store = seeded_store();
        let high_id = store
            .tasks()
            .iter()
            .find(|t| t.priority == Some(Priority::High))
            .map(|t| t.id.clone())
            .expect("seeded high task");
        let all: Vec<&Task> = store.tasks().iter().collect();
        assert_eq!(filter_by_tab(all, Tab::High).len(), 1);

        assert!(store.set_completed(&high_id, true));
        let all: Vec<&Task> = store.tasks().iter().collect();
        assert_eq!(filter_by_tab(all, Tab::High).len(), 0);
    }

    #[test]
    fn stats_identities_hold() {
        let mut store = seeded_store();
        let first = store.tasks()[0].id.clone();
        store.set_completed(&first, true);
        let all: Vec<&Task> = store.tasks().iter().collect();
        let s = stats(&all);
        assert_eq!(s.total, store.tasks().len());
        assert_eq!(s.completed + s.pending, s.total);
        assert_eq!(s.high_priority, 1);
    }

    #[test]
    fn rename_discards_blank_titles() {
        let mut store = seeded_store();
        let id = store.tasks()[0].id.clone();
        let original = store.tasks()[0].title.clone();
        assert!(!store.rename(&id, "   "));
        assert_eq!(store.tasks()[0].title, original);
        assert!(store.rename(&id, "  Renamed  "));
        assert_eq!(store.tasks()[0].title, "Renamed");
    }

    #[test]
    fn delete_and_complete_are_noops_for_unknown_ids() {
        let mut store = seeded_store();
        assert!(!store.delete("missing"));
        assert!(!store.set_completed("missing", true));
        assert_eq!(store.tasks().len(), 3);
    }
}
