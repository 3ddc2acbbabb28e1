mod academic_sessions;
mod attendance;
mod courses;
mod students;

pub use academic_sessions::AcademicSessionStore;
pub use attendance::{AttendanceStore, MarkRequest};
pub use courses::CourseStore;
pub use students::StudentStore;

use chrono::{Local, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("{0}")]
    MutationFailed(String),
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error("student not found: {0}")]
    StudentNotFound(String),
}

/// Wall-clock seam for the marking engine. Marking stamps records with the
/// caller's current date, not the session's nominal date, so tests inject
/// a fixed clock here.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    /// Clock label stored on the record, e.g. "09:15:00 AM". Informational
    /// only.
    fn time_label(&self) -> String;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn time_label(&self) -> String {
        Local::now().format("%I:%M:%S %p").to_string()
    }
}
