//! Page content, one module per area of the console.

pub mod attendance;
pub mod dashboard;
pub mod employees;
pub mod settings;
pub mod welcome;
