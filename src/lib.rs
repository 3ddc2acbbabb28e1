//! Attendance session engine: the entity model, the in-memory session
//! stores mirroring the backend, the idempotent marking logic, and the
//! filter/aggregation layer the list views, tables, and exporters read.
//!
//! The stores are plain injected containers; construct them with an
//! [`api::ApiClient`] (the reqwest-backed [`api::HttpApiClient`] in the
//! app, a mock in tests) and pass them by reference to consumers.

pub mod api;
pub mod filter;
pub mod model;
pub mod report;
pub mod store;
mod wire;

pub use api::{ApiClient, ApiEnvelope, ApiError, HttpApiClient, Method};
pub use model::{
    AcademicSession, AttendanceRecord, AttendanceSession, AttendanceStatus, AttendanceStudent,
    Course, NewAcademicSession, NewAttendanceSession, NewCourse, NewStudent, Student,
};
pub use report::EngineConfig;
pub use store::{
    AcademicSessionStore, AttendanceStore, Clock, CourseStore, MarkRequest, StoreError,
    StudentStore, SystemClock,
};
