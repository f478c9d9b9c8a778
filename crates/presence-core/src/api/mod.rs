//! REST API client module for the attendance service.
//!
//! This module provides the `ApiClient` for fetching employees, attendance
//! records, dashboard numbers, and the organisation config. Reads go through
//! the shared `ResponseCache`; writes go straight to the server and then
//! invalidate the entries they made stale.
//!
//! Requests leave the process through the `Transport` trait so the client can
//! be driven by an in-memory server in tests.

pub mod attendance;
pub mod client;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod settings;
pub mod transport;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};
