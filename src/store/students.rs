use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::model::{NewStudent, Student};
use crate::store::StoreError;
use crate::wire;

/// Student roster mirror. Attendance sessions reference the roster by
/// level at activation time; [`Self::has_students_at_level`] backs the
/// create-session precondition (at least one student at the requested
/// level), which callers check before creating an attendance session.
pub struct StudentStore {
    api: Arc<dyn ApiClient>,
    students: Vec<Student>,
    error: Option<String>,
    loading: bool,
}

impl StudentStore {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            students: Vec::new(),
            error: None,
            loading: false,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn students_at_level<'a>(&'a self, level: &'a str) -> impl Iterator<Item = &'a Student> {
        self.students.iter().filter(move |s| s.level == level)
    }

    pub fn has_students_at_level(&self, level: &str) -> bool {
        self.students_at_level(level).next().is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn fetch_students(&mut self) {
        self.loading = true;
        match self.api.get("students").await {
            Ok(envelope) => {
                let students = wire::decode_student_rows(&envelope.rows());
                debug!(count = students.len(), "replacing student cache");
                self.students = students;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "student fetch failed, keeping stale cache");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn create_student(&mut self, data: &NewStudent) -> Result<(), StoreError> {
        let body = serde_json::to_value(data)
            .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
        match self.api.post("students", Some(body)).await {
            Ok(_) => {
                self.fetch_students().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }

    pub async fn delete_student(&mut self, id: &str) -> Result<(), StoreError> {
        match self.api.delete(&format!("students/{}", id)).await {
            Ok(_) => {
                self.students.retain(|s| s.id != id);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }
}
