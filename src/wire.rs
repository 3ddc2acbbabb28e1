//! Wire shapes as the backend actually sends them, and their decode into
//! the in-memory model. Decode degrades per record: a bad status literal
//! becomes not-marked, a structurally bad student entry is skipped with a
//! warning, and only a session missing its id fails the row.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::model::{
    AcademicSession, AttendanceRecord, AttendanceSession, AttendanceStatus, AttendanceStudent,
    Course, Student,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseRefWire {
    #[serde(default)]
    course_title: String,
    #[serde(default)]
    course_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SessionRefWire {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusEntryWire {
    date: String,
    status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentEntryWire {
    student_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    reg_no: String,
    #[serde(default)]
    attendance_status: Vec<StatusEntryWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttendanceWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    course: CourseRefWire,
    // The backend sends this field misspelled; keep the rename exact.
    #[serde(default, rename = "acedemicSession")]
    academic_session: SessionRefWire,
    #[serde(default)]
    level: String,
    #[serde(default)]
    semester: String,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    students: Vec<Value>,
}

/// `YYYY-MM-DD` slice of a date that may arrive as a full ISO timestamp.
fn date_key(raw: &str) -> String {
    raw.split('T').next().unwrap_or(raw).to_string()
}

fn parse_status(raw: &str) -> AttendanceStatus {
    match raw {
        "present" => AttendanceStatus::Present,
        "absent" => AttendanceStatus::Absent,
        "not-marked" => AttendanceStatus::NotMarked,
        other => {
            warn!(status = other, "unknown attendance status, treating as not-marked");
            AttendanceStatus::NotMarked
        }
    }
}

fn decode_student_entry(raw: &Value) -> Option<AttendanceStudent> {
    let entry: StudentEntryWire = match serde_json::from_value(raw.clone()) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "skipping malformed student entry");
            return None;
        }
    };

    let mut student = AttendanceStudent {
        id: entry.student_id,
        name: entry.name,
        registration_number: entry.reg_no,
        attendance: Default::default(),
    };
    for item in entry.attendance_status {
        let status = parse_status(&item.status);
        // An explicit not-marked wire status is a legacy synonym for "no
        // entry"; translate it away so the sparse map is the single
        // representation of unmarked days.
        if !status.is_marked() {
            continue;
        }
        student
            .attendance
            .insert(date_key(&item.date), AttendanceRecord { status, time: None });
    }
    Some(student)
}

pub fn decode_attendance_session(raw: &Value) -> Result<AttendanceSession, String> {
    let wire: AttendanceWire =
        serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;

    let students = wire
        .students
        .iter()
        .filter_map(decode_student_entry)
        .collect();

    Ok(AttendanceSession {
        id: wire.id,
        course: wire.course.course_title,
        course_code: wire.course.course_code,
        level: wire.level,
        session_name: wire.academic_session.name,
        date: date_key(&wire.created_at),
        semester: wire.semester,
        is_active: wire.active,
        students,
    })
}

/// Decodes a fetched batch, dropping (and logging) rows that cannot be
/// decoded at all so one bad row never fails the whole collection.
pub fn decode_attendance_rows(rows: &[Value]) -> Vec<AttendanceSession> {
    rows.iter()
        .filter_map(|row| match decode_attendance_session(row) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "skipping undecodable attendance row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    course_title: String,
    #[serde(default)]
    course_code: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    semester: Option<String>,
}

pub fn decode_course_rows(rows: &[Value]) -> Vec<Course> {
    rows.iter()
        .filter_map(|row| match serde_json::from_value::<CourseWire>(row.clone()) {
            Ok(wire) => Some(Course {
                id: wire.id,
                course_name: wire.course_title,
                course_code: wire.course_code,
                description: wire.description,
                level: wire.level,
                semester: wire.semester,
            }),
            Err(e) => {
                warn!(error = %e, "skipping undecodable course row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    reg_no: String,
    #[serde(default)]
    course: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    admission_year: String,
    #[serde(default)]
    avatar: Option<String>,
}

pub fn decode_student_rows(rows: &[Value]) -> Vec<Student> {
    rows.iter()
        .filter_map(|row| match serde_json::from_value::<StudentWire>(row.clone()) {
            Ok(wire) => Some(Student {
                full_name: format!("{} {}", wire.first_name, wire.last_name),
                id: wire.id,
                first_name: wire.first_name,
                last_name: wire.last_name,
                email: wire.email,
                registration_number: wire.reg_no,
                course: wire.course,
                level: wire.level,
                admission_year: wire.admission_year,
                avatar: wire.avatar.unwrap_or_default(),
            }),
            Err(e) => {
                warn!(error = %e, "skipping undecodable student row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AcademicSessionWire {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    semesters: Vec<String>,
    #[serde(default)]
    active: bool,
}

pub fn decode_academic_session_rows(rows: &[Value]) -> Vec<AcademicSession> {
    rows.iter()
        .filter_map(
            |row| match serde_json::from_value::<AcademicSessionWire>(row.clone()) {
                Ok(wire) => Some(AcademicSession {
                    id: wire.id,
                    session_name: wire.name,
                    start_date: date_key(&wire.start_date),
                    end_date: date_key(&wire.end_date),
                    semesters: wire.semesters,
                    is_active: wire.active,
                }),
                Err(e) => {
                    warn!(error = %e, "skipping undecodable academic session row");
                    None
                }
            },
        )
        .collect()
}
