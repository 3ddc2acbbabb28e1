use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::model::{Course, NewCourse};
use crate::store::StoreError;
use crate::wire;

/// Course roster mirror. Courses are immutable once created; the only
/// mutations are create and delete.
pub struct CourseStore {
    api: Arc<dyn ApiClient>,
    courses: Vec<Course>,
    error: Option<String>,
    loading: bool,
}

impl CourseStore {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            courses: Vec::new(),
            error: None,
            loading: false,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replaces the cache on success; keeps the stale cache and records
    /// the error on failure.
    pub async fn fetch_courses(&mut self) {
        self.loading = true;
        match self.api.get("courses").await {
            Ok(envelope) => {
                let courses = wire::decode_course_rows(&envelope.rows());
                debug!(count = courses.len(), "replacing course cache");
                self.courses = courses;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "course fetch failed, keeping stale cache");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn create_course(&mut self, data: &NewCourse) -> Result<(), StoreError> {
        let body = serde_json::to_value(data)
            .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
        match self.api.post("courses", Some(body)).await {
            Ok(_) => {
                self.fetch_courses().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }

    pub async fn delete_course(&mut self, id: &str) -> Result<(), StoreError> {
        match self.api.delete(&format!("courses/{}", id)).await {
            Ok(_) => {
                self.courses.retain(|c| c.id != id);
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
