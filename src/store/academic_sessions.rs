use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::model::{AcademicSession, NewAcademicSession};
use crate::store::StoreError;
use crate::wire;

/// Academic year mirror. Creating a session makes the backend end the
/// previously active one and promote students; this store observes that
/// through the post-create re-fetch rather than enforcing it.
pub struct AcademicSessionStore {
    api: Arc<dyn ApiClient>,
    sessions: Vec<AcademicSession>,
    error: Option<String>,
    loading: bool,
}

impl AcademicSessionStore {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            sessions: Vec::new(),
            error: None,
            loading: false,
        }
    }

    pub fn sessions(&self) -> &[AcademicSession] {
        &self.sessions
    }

    pub fn active_session(&self) -> Option<&AcademicSession> {
        self.sessions.iter().find(|s| s.is_active)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub async fn fetch_sessions(&mut self) {
        self.loading = true;
        match self.api.get("academic-sessions").await {
            Ok(envelope) => {
                let sessions = wire::decode_academic_session_rows(&envelope.rows());
                debug!(count = sessions.len(), "replacing academic session cache");
                self.sessions = sessions;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "academic session fetch failed, keeping stale cache");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    pub async fn create_session(&mut self, data: &NewAcademicSession) -> Result<(), StoreError> {
        let body = serde_json::to_value(data)
            .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
        match self.api.post("academic-sessions", Some(body)).await {
            Ok(_) => {
                self.fetch_sessions().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }

    pub async fn delete_session(&mut self, id: &str) -> Result<(), StoreError> {
        match self.api.delete(&format!("academic-sessions/{}", id)).await {
            Ok(_) => {
                self.sessions.retain(|s| s.id != id);
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
