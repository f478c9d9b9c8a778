//! In-memory caching of API responses.
//!
//! This module provides the `ResponseCache`, a map from request locator to
//! decoded response body. Each entry removes itself when its time-to-live
//! elapses; write operations invalidate entries explicitly.

pub mod response;

pub use response::{ResponseCache, DEFAULT_TTL};
