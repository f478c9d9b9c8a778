//! Data models for the attendance API.
//!
//! Wire records (`Api*`) mirror what the server sends and keep every field
//! optional. Each converts into a view model with defaults filled in:
//!
//! - `Employee`, `NewEmployee`, `EmployeeUpdate`: roster records and payloads
//! - `AttendanceRecord`, `DailyAttendance`, `AttendanceDate`: attendance views
//! - `ConfigData`, `ConfigPatch`: organisation config (geofence, maps key)
//! - `DashboardData`: dashboard headline numbers

pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod remote_config;
mod wire;

pub use attendance::{
    summarize_by_date, ApiAttendanceRecord, AttendanceDate, AttendanceRecord, AttendanceStatus,
    DailyAttendance, LocationData,
};
pub use dashboard::DashboardData;
pub use employee::{ApiEmployee, Ctc, Employee, EmployeeUpdate, NewEmployee, ShiftHours};
pub use remote_config::{AttendanceSettings, ConfigData, ConfigPatch, OfficeCoordinates};
