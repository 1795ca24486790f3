//! Attendance tracking for the HRMS service.
//!
//! Layers, outermost first: `api` (actix-web handlers), `service` (business
//! rules), `store` (persistence and the employee directory).

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
pub mod telemetry;

pub use error::{AttendanceError, AttendanceResult, StoreError, StoreResult};
pub use model::attendance::{
    AttendanceList, AttendanceRecord, AttendanceStatus, NewAttendance, PresenceSummary,
};
pub use service::AttendanceService;
pub use store::{
    AttendanceStore, EmployeeDirectory, InMemoryAttendanceStore, InMemoryEmployeeDirectory,
    MySqlAttendanceStore, MySqlEmployeeDirectory,
};
