#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rollbook::{ApiClient, ApiEnvelope, ApiError, Clock, Method};
use serde_json::{json, Value};

/// Scripted API collaborator: queued responses are handed out in call
/// order, and every call is recorded for sequence assertions.
pub struct MockApi {
    calls: Mutex<Vec<(Method, String)>>,
    responses: Mutex<VecDeque<Result<ApiEnvelope, ApiError>>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    pub fn push_rows(&self, rows: Value) {
        self.responses.lock().expect("responses lock").push_back(Ok(ApiEnvelope {
            status: "success".to_string(),
            message: String::new(),
            data: json!({ "data": rows }),
        }));
    }

    pub fn push_ack(&self) {
        self.responses.lock().expect("responses lock").push_back(Ok(ApiEnvelope {
            status: "success".to_string(),
            message: String::new(),
            data: Value::Null,
        }));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(ApiError::Remote(message.to_string())));
    }

    pub fn calls(&self) -> Vec<(Method, String)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn request(
        &self,
        path: &str,
        method: Method,
        _body: Option<Value>,
    ) -> Result<ApiEnvelope, ApiError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((method, path.to_string()));
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Transport("no scripted response".to_string()))
            })
    }
}

/// Clock pinned to one date; the time label is settable so tests can
/// observe a second mark refreshing the stored time.
pub struct FixedClock {
    date: NaiveDate,
    label: Mutex<String>,
}

impl FixedClock {
    pub fn new(date: &str, label: &str) -> Arc<Self> {
        Arc::new(Self {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("clock date"),
            label: Mutex::new(label.to_string()),
        })
    }

    pub fn set_label(&self, label: &str) {
        *self.label.lock().expect("label lock") = label.to_string();
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn time_label(&self) -> String {
        self.label.lock().expect("label lock").clone()
    }
}

pub fn wire_student(id: &str, name: &str, reg_no: &str, statuses: Value) -> Value {
    json!({
        "studentId": id,
        "name": name,
        "regNo": reg_no,
        "attendanceStatus": statuses
    })
}

pub fn wire_session(
    id: &str,
    course: &str,
    code: &str,
    level: &str,
    active: bool,
    students: Value,
) -> Value {
    json!({
        "_id": id,
        "course": { "courseTitle": course, "courseCode": code },
        "acedemicSession": { "name": "2023/2024" },
        "level": level,
        "semester": "First",
        "active": active,
        "createdAt": "2024-02-10T08:00:00.000Z",
        "students": students
    })
}
