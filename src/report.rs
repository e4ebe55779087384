use anyhow::Context;
use chrono::DateTime;
use std::path::Path;

use crate::attendance::{Session, Student};

/// Builds the attendance report for one session: a title line, a
/// `Name,Roll Number,Status` header, then present rows followed by absent
/// rows in roster order.
pub fn build_report(
    session: &Session,
    present: &[&Student],
    absent: &[&Student],
) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Name", "Roll Number", "Status"])
        .context("write report header")?;
    for student in present {
        writer
            .write_record([&student.name, &student.roll_number, "Present"])
            .context("write present row")?;
    }
    for student in absent {
        writer
            .write_record([&student.name, &student.roll_number, "Absent"])
            .context("write absent row")?;
    }
    let body = String::from_utf8(writer.into_inner().context("flush report rows")?)
        .context("report rows are not utf-8")?;

    let date = DateTime::parse_from_rfc3339(&session.date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| session.date.clone());
    Ok(format!(
        "Attendance for: {} - {}\n{}",
        session.name, date, body
    ))
}

/// `attendance_<name>.csv` with whitespace runs collapsed to underscores.
pub fn report_filename(session_name: &str) -> String {
    let mut cleaned = String::with_capacity(session_name.len());
    let mut in_space = false;
    for c in session_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                cleaned.push('_');
            }
            in_space = true;
        } else {
            cleaned.push(c);
            in_space = false;
        }
    }
    format!("attendance_{}.csv", cleaned)
}

pub fn write_report(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content).with_context(|| format!("write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::SessionStatus;

    fn student(name: &str, roll: &str) -> Student {
        Student {
            id: format!("id-{}", roll),
            name: name.to_string(),
            roll_number: roll.to_string(),
            present: false,
            photo_url: None,
        }
    }

    fn session(name: &str) -> Session {
        Session {
            id: "sess-1".to_string(),
            name: name.to_string(),
            date: "2026-03-02T10:00:00+00:00".to_string(),
            total_students: 3,
            present_count: 2,
            absent_count: 1,
            status: SessionStatus::Completed,
            photos: Vec::new(),
        }
    }

    #[test]
    fn report_has_two_header_lines_then_present_then_absent() {
        let a = student("Ada Lovelace", "CS001");
        let b = student("Alan Turing", "CS002");
        let c = student("Grace Hopper", "CS003");
        let present = vec![&a, &b];
        let absent = vec![&c];

        let content = build_report(&session("Weekly Sync"), &present, &absent).expect("report");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Attendance for: Weekly Sync - 3/2/2026");
        assert_eq!(lines[1], "Name,Roll Number,Status");
        assert_eq!(lines[2], "Ada Lovelace,CS001,Present");
        assert_eq!(lines[3], "Alan Turing,CS002,Present");
        assert_eq!(lines[4], "Grace Hopper,CS003,Absent");
    }

    #[test]
    fn commas_in_names_stay_one_field() {
        let a = student("Lovelace, Ada", "CS001");
        let present = vec![&a];
        let content = build_report(&session("S"), &present, &[]).expect("report");
        assert!(content.lines().nth(2).expect("row").starts_with("\"Lovelace, Ada\","));
    }

    #[test]
    fn filename_collapses_whitespace_runs() {
        assert_eq!(report_filename("Weekly Sync"), "attendance_Weekly_Sync.csv");
        assert_eq!(report_filename("a  b\tc"), "attendance_a_b_c.csv");
        assert_eq!(report_filename("solo"), "attendance_solo.csv");
    }
}
