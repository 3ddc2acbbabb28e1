use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::model::{AttendanceRecord, AttendanceSession, AttendanceStatus, NewAttendanceSession};
use crate::report::EngineConfig;
use crate::store::{Clock, StoreError, SystemClock};
use crate::wire;

/// Body of the remote marking call. The server identifies students by
/// level and registration number, not by the internal student id, so the
/// store maps the id space before the caller goes over the wire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarkRequest {
    pub level: String,
    pub reg_no: String,
    pub status: AttendanceStatus,
}

/// Authoritative in-memory mirror of the attendance sessions plus the
/// selected-session pointer.
///
/// Selection is held as an id and resolved against the collection on read,
/// so a marked record is visible through `selected_session()` without a
/// second write and the two views cannot diverge.
///
/// Operations take `&mut self`, which serializes them per store instance.
/// Overlapping remote fetches are therefore last-applied-wins, and rapid
/// double-marking is last-write-wins; there is no sequencing token.
pub struct AttendanceStore {
    api: Arc<dyn ApiClient>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    sessions: Vec<AttendanceSession>,
    selected_id: Option<String>,
    error: Option<String>,
    loading: bool,
}

impl AttendanceStore {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self::with_clock(api, Arc::new(SystemClock))
    }

    pub fn with_clock(api: Arc<dyn ApiClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            config: EngineConfig::default(),
            sessions: Vec::new(),
            selected_id: None,
            error: None,
            loading: false,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sessions(&self) -> &[AttendanceSession] {
        &self.sessions
    }

    pub fn session(&self, id: &str) -> Option<&AttendanceSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Loads the whole collection from the backend and replaces the cache.
    /// On failure the previous cache stays available and the error is
    /// recorded instead of propagated (stale-but-available policy).
    pub async fn fetch_attendance(&mut self) {
        self.loading = true;
        match self.api.get("attendance").await {
            Ok(envelope) => {
                let sessions = wire::decode_attendance_rows(&envelope.rows());
                debug!(count = sessions.len(), "replacing attendance cache");
                self.sessions = sessions;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "attendance fetch failed, keeping stale cache");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Pure pointer assignment. No validation; callers pass an id that
    /// exists in the collection, or `None` to deselect.
    pub fn set_selected_session(&mut self, id: Option<String>) {
        self.selected_id = id;
    }

    pub fn selected_session(&self) -> Option<&AttendanceSession> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.session(id))
    }

    /// Local-only marking. Call sites are expected to have already made
    /// the remote marking call (see [`Self::marking_payload`]) and only
    /// then mirror the result here; the two steps are deliberately not
    /// atomic.
    ///
    /// The record is keyed by the clock's current date and overwritten on
    /// repeat marks, so marking twice refreshes `time` and never produces
    /// a second record. Marking with `NotMarked` clears the day back to
    /// the sparse unmarked representation.
    ///
    /// The store does not require the session to be active; exposing mark
    /// actions only on active sessions is a presentation rule enforced at
    /// the boundary.
    pub fn mark_attendance(
        &mut self,
        session_id: &str,
        student_id: &str,
        status: AttendanceStatus,
    ) -> Result<(), StoreError> {
        let date_key = self.clock.today().format("%Y-%m-%d").to_string();
        let time = self.clock.time_label();

        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        let student = session
            .student_mut(student_id)
            .ok_or_else(|| StoreError::StudentNotFound(student_id.to_string()))?;

        if status.is_marked() {
            student.attendance.insert(
                date_key,
                AttendanceRecord {
                    status,
                    time: Some(time),
                },
            );
        } else {
            student.attendance.remove(&date_key);
        }
        Ok(())
    }

    /// Maps the internal student id back to the `{level, regNo}` pair the
    /// marking endpoints key on.
    pub fn marking_payload(
        &self,
        session_id: &str,
        student_id: &str,
        status: AttendanceStatus,
    ) -> Result<MarkRequest, StoreError> {
        let session = self
            .session(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        let student = session
            .student(student_id)
            .ok_or_else(|| StoreError::StudentNotFound(student_id.to_string()))?;
        Ok(MarkRequest {
            level: session.level.clone(),
            reg_no: student.registration_number.clone(),
            status,
        })
    }

    /// Remote call first; the local flag is only patched on success, so a
    /// failed call leaves local state untouched.
    pub async fn activate_session(&mut self, id: &str) -> Result<(), StoreError> {
        self.set_active(id, true).await
    }

    pub async fn deactivate_session(&mut self, id: &str) -> Result<(), StoreError> {
        self.set_active(id, false).await
    }

    async fn set_active(&mut self, id: &str, active: bool) -> Result<(), StoreError> {
        let action = if active { "activate" } else { "deactivate" };
        match self
            .api
            .put(&format!("attendance/{}/{}", action, id), None)
            .await
        {
            Ok(_) => {
                if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
                    session.is_active = active;
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }

    /// Remote delete, then removal from the collection. If the deleted
    /// session was selected the selection is cleared.
    pub async fn delete_session(&mut self, id: &str) -> Result<(), StoreError> {
        match self.api.delete(&format!("attendance/{}", id)).await {
            Ok(_) => {
                self.sessions.retain(|s| s.id != id);
                if self.selected_id.as_deref() == Some(id) {
                    self.selected_id = None;
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }

    /// Creates a session remotely, then always re-fetches the full
    /// collection: the backend answers with the nested course/session
    /// shape, and the fetch path already owns that decode.
    pub async fn create_attendance(
        &mut self,
        data: &NewAttendanceSession,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_value(data)
            .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;
        match self.api.post("attendance", Some(body)).await {
            Ok(_) => {
                self.fetch_attendance().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(StoreError::MutationFailed(e.to_string()))
            }
        }
    }

    /// Date columns for the selected target count; see
    /// [`crate::report::generate_attendance_columns`].
    pub fn attendance_columns(&self, session_id: &str) -> Result<Vec<String>, StoreError> {
        let session = self
            .session(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        Ok(crate::report::generate_attendance_columns(
            session,
            self.config.column_target,
        ))
    }
}
