//! Utility functions for string formatting.

pub mod format;

pub use format::{
    format_date, format_hours, format_optional, format_phone, format_time, truncate_string,
};
