use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::attendance::Student;
use crate::tasks::{Priority, Role, Task, User};

/// Demo seed data. Ids are minted at startup, so every process run gets a
/// fresh set; clients discover them through users.list / students.list.
pub fn sample_users() -> Vec<User> {
    let mut users = vec![
        user("Ishit Dandawate", Role::Head, "ishit@csi.org"),
        user("Anannya Gupta", Role::Core, "anannya@csi.org"),
        user("Aksh Garg", Role::Core, "aksh@csi.org"),
        user("Tanmay Bansal", Role::Core, "tanmay@csi.org"),
        user("Abhilove Goyal", Role::Core, "abhilove@csi.org"),
    ];
    users[0].position = Some("Project Lead".to_string());
    users[0].profile_image = Some("/uploads/ishit.png".to_string());
    users[1].position = Some("Developer".to_string());
    users[2].position = Some("Designer".to_string());
    users[3].position = Some("Content Writer".to_string());
    users[4].position = Some("Marketing".to_string());
    users
}

pub fn sample_students() -> Vec<Student> {
    let names = [
        "Ishit Dandawate",
        "Anannya Gupta",
        "Aksh Garg",
        "Tanmay Bansal",
        "Abhilove Goyal",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Student {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            roll_number: format!("CS{:03}", i + 1),
            present: false,
            photo_url: if i == 0 {
                Some("/uploads/ishit.png".to_string())
            } else {
                None
            },
        })
        .collect()
}

pub fn sample_tasks(users: &[User]) -> Vec<Task> {
    let now = Utc::now();
    let lead = users[0].id.clone();
    vec![
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Complete project proposal".to_string(),
            description: Some("Finalize the proposal for the upcoming CSI event".to_string()),
            completed: false,
            created_at: now.to_rfc3339(),
            due_date: Some((now + Duration::days(2)).to_rfc3339()),
            priority: Some(Priority::High),
            assigned_to: Some(users[1].id.clone()),
            assigned_by: Some(lead.clone()),
            category: Some("Documentation".to_string()),
        },
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Review code changes".to_string(),
            description: Some("Review the PR for the new homepage".to_string()),
            completed: false,
            created_at: now.to_rfc3339(),
            due_date: Some((now + Duration::days(1)).to_rfc3339()),
            priority: Some(Priority::Medium),
            assigned_to: Some(users[2].id.clone()),
            assigned_by: Some(lead.clone()),
            category: Some("Development".to_string()),
        },
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Schedule team meeting".to_string(),
            description: Some("Coordinate with all team members for weekly sync".to_string()),
            completed: true,
            created_at: now.to_rfc3339(),
            due_date: None,
            priority: Some(Priority::Low),
            assigned_to: Some(users[3].id.clone()),
            assigned_by: Some(lead),
            category: Some("Management".to_string()),
        },
    ]
}

fn user(name: &str, role: Role, email: &str) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        role,
        email: email.to_string(),
        position: None,
        profile_image: None,
    }
}
