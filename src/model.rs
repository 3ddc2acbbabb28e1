use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Closed status set for a single day's record. Unknown literals arriving
/// from the backend are degraded to `NotMarked` at the decode boundary
/// rather than dropping the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    NotMarked,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::NotMarked => "not-marked",
        }
    }

    /// Present and Absent count toward the marked denominator; NotMarked
    /// does not.
    pub fn is_marked(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Absent)
    }
}

/// One day's record for one student. `time` is the wall-clock label
/// captured at marking time; informational only, never used for ordering
/// or computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Per-session view of a student. Distinct from the roster `Student`: the
/// ids live in different spaces and the server keys marking calls on
/// `registration_number`, not on either id.
///
/// `attendance` is sparse and keyed by `YYYY-MM-DD`; a missing key means
/// the day was never marked. The BTreeMap keeps iteration date-ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStudent {
    pub id: String,
    pub name: String,
    pub registration_number: String,
    #[serde(default)]
    pub attendance: BTreeMap<String, AttendanceRecord>,
}

/// Aggregate root of the engine: one course/level/semester instance
/// against which daily presence is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSession {
    pub id: String,
    pub course: String,
    pub course_code: String,
    pub level: String,
    pub session_name: String,
    pub date: String,
    pub semester: String,
    pub is_active: bool,
    pub students: Vec<AttendanceStudent>,
}

impl AttendanceSession {
    pub fn student(&self, student_id: &str) -> Option<&AttendanceStudent> {
        self.students.iter().find(|s| s.id == student_id)
    }

    pub fn student_mut(&mut self, student_id: &str) -> Option<&mut AttendanceStudent> {
        self.students.iter_mut().find(|s| s.id == student_id)
    }
}

/// Payload for creating a new attendance session. The backend assigns the
/// id and returns the nested shape, so the store re-fetches after create
/// instead of inserting locally.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceSession {
    pub course: String,
    pub level: String,
    pub semester: String,
    pub academic_session: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub course_name: String,
    pub course_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub course_name: String,
    pub course_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

/// Roster entity owned by the student store. Referenced by level when
/// attendance sessions are created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub registration_number: String,
    pub course: String,
    pub level: String,
    pub admission_year: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registration_number: String,
    pub course: String,
    pub level: String,
    pub admission_year: String,
}

/// Academic year window. `is_active` is exclusive by backend convention:
/// creating a new session ends the currently active one and promotes
/// students to the next level server-side. The store only observes this
/// via re-fetch; it never enforces the exclusivity itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSession {
    pub id: String,
    pub session_name: String,
    pub start_date: String,
    pub end_date: String,
    pub semesters: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAcademicSession {
    pub session_name: String,
    pub start_date: String,
    pub end_date: String,
    pub semesters: Vec<String>,
}
