//! Core library for the Presence attendance console.
//!
//! - `api`: typed client for the remote attendance REST API
//! - `cache`: in-memory response cache with per-entry expiry
//! - `store`: session and preference state persisted to durable storage
//! - `models`: wire records and the view models built from them
//! - `forms`: input validation for the employee and geofence forms
//! - `config`: local application configuration
//! - `notify`: user-visible notifications raised by the API layer

pub mod api;
pub mod cache;
pub mod config;
pub mod forms;
pub mod models;
pub mod notify;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use cache::ResponseCache;
pub use config::Config;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use store::{SessionStore, Storage};
