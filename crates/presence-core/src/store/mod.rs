//! Session and preference state.
//!
//! `SessionStore` owns the login status, theme, office geofence, and maps
//! key. Every change is mirrored into a `Storage` backend and read back once
//! at startup.

pub mod session;
pub mod storage;

pub use session::{AuthError, OfficeGeofence, SessionState, SessionStore, Theme};
pub use storage::{FileStorage, MemoryStorage, Storage};
