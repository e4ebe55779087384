use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Uploaded images arrive as data URLs; anything larger than this after
/// base64 decoding is rejected before the recognizer runs.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_number: String,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    pub uploaded_at: String,
    pub recognized_faces: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub date: String,
    pub total_students: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub status: SessionStatus,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub session_id: String,
    pub student_id: String,
    pub timestamp: String,
    pub is_present: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceError {
    SessionNotFound,
    SessionCompleted,
    BadImage(&'static str),
}

impl AttendanceError {
    pub fn message(&self) -> &'static str {
        match self {
            AttendanceError::SessionNotFound => "session not found",
            AttendanceError::SessionCompleted => "session is already completed",
            AttendanceError::BadImage(msg) => msg,
        }
    }
}

/// Maps an uploaded photo to a count of recognized students. Production uses
/// a uniform draw; tests inject a fixed count.
pub trait Recognizer {
    /// Returns a count in `1..=roster_len`.
    fn recognize(&mut self, roster_len: usize) -> usize;
}

pub struct UniformRecognizer;

impl Recognizer for UniformRecognizer {
    fn recognize(&mut self, roster_len: usize) -> usize {
        rand::thread_rng().gen_range(1..=roster_len.max(1))
    }
}

pub struct FixedRecognizer(pub usize);

impl Recognizer for FixedRecognizer {
    fn recognize(&mut self, roster_len: usize) -> usize {
        self.0.clamp(1, roster_len.max(1))
    }
}

/// Session lifecycle plus mock attendance derivation. The roster is fixed at
/// construction; presence is derived per session from recognition records,
/// and a student with no record for a session counts as absent.
pub struct AttendanceStore {
    roster: Vec<Student>,
    sessions: Vec<Session>,
    records: Vec<AttendanceRecord>,
    // Id of the open session, if any. The session list is the single source
    // of truth; this is only ever a key into it.
    current: Option<String>,
    recognizer: Box<dyn Recognizer>,
}

impl AttendanceStore {
    pub fn new(roster: Vec<Student>, recognizer: Box<dyn Recognizer>) -> AttendanceStore {
        AttendanceStore {
            roster,
            sessions: Vec::new(),
            records: Vec::new(),
            current: None,
            recognizer,
        }
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn current_session(&self) -> Option<&Session> {
        let id = self.current.as_deref()?;
        self.session(id)
    }

    /// New sessions start active with the full roster absent and become the
    /// current session. Newest first, matching the task list contract.
    pub fn create_session(&mut self, name: &str) -> &Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            date: Utc::now().to_rfc3339(),
            total_students: self.roster.len(),
            present_count: 0,
            absent_count: self.roster.len(),
            status: SessionStatus::Active,
            photos: Vec::new(),
        };
        self.current = Some(session.id.clone());
        self.sessions.insert(0, session);
        &self.sessions[0]
    }

    pub fn upload_photo(
        &mut self,
        session_id: &str,
        image_data: &str,
    ) -> Result<Photo, AttendanceError> {
        check_image_payload(image_data).map_err(AttendanceError::BadImage)?;
        let idx = self
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or(AttendanceError::SessionNotFound)?;
        if self.sessions[idx].status == SessionStatus::Completed {
            return Err(AttendanceError::SessionCompleted);
        }

        let recognized = self.recognizer.recognize(self.roster.len());
        let photo = Photo {
            id: Uuid::new_v4().to_string(),
            url: image_data.to_string(),
            uploaded_at: Utc::now().to_rfc3339(),
            recognized_faces: recognized,
        };
        self.sessions[idx].photos.push(photo.clone());

        // Position-based mock: the first `recognized` roster entries are the
        // ones "seen" in the photo.
        let timestamp = Utc::now().to_rfc3339();
        for student in self.roster.iter().take(recognized) {
            self.records.push(AttendanceRecord {
                session_id: session_id.to_string(),
                student_id: student.id.clone(),
                timestamp: timestamp.clone(),
                is_present: true,
            });
        }

        self.recount(idx);
        Ok(photo)
    }

    pub fn complete_session(&mut self, session_id: &str) -> Result<(), AttendanceError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or(AttendanceError::SessionNotFound)?;
        session.status = SessionStatus::Completed;
        if self.current.as_deref() == Some(session_id) {
            self.current = None;
        }
        Ok(())
    }

    pub fn view_session(&mut self, session_id: &str) -> Result<(), AttendanceError> {
        if self.session(session_id).is_none() {
            return Err(AttendanceError::SessionNotFound);
        }
        self.current = Some(session_id.to_string());
        Ok(())
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn present_students(&self, session_id: &str) -> Vec<&Student> {
        let present = self.present_ids(session_id);
        self.roster
            .iter()
            .filter(|s| present.contains(s.id.as_str()))
            .collect()
    }

    pub fn absent_students(&self, session_id: &str) -> Vec<&Student> {
        let present = self.present_ids(session_id);
        self.roster
            .iter()
            .filter(|s| !present.contains(s.id.as_str()))
            .collect()
    }

    fn present_ids(&self, session_id: &str) -> HashSet<&str> {
        self.records
            .iter()
            .filter(|r| r.session_id == session_id && r.is_present)
            .map(|r| r.student_id.as_str())
            .collect()
    }

    // Counts derive from the union of all records for the session, so a
    // later photo recognizing fewer faces never shrinks present_count.
    fn recount(&mut self, idx: usize) {
        let session_id = self.sessions[idx].id.clone();
        let present = self.present_ids(&session_id).len();
        let session = &mut self.sessions[idx];
        session.present_count = present;
        session.absent_count = session.total_students - present;
    }
}

fn check_image_payload(image_data: &str) -> Result<(), &'static str> {
    let Some(rest) = image_data.strip_prefix("data:image/") else {
        return Err("only image uploads are supported");
    };
    let encoded = rest.split_once(',').map(|(_, body)| body).unwrap_or("");
    // Rough decoded size; good enough to enforce the cap without decoding.
    if encoded.len() / 4 * 3 > MAX_IMAGE_BYTES {
        return Err("image size should be less than 5MB");
    }
    Ok(())
}
