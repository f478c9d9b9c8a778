//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout, and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling for both themes
//! - `form`: Shared rendering for the editable forms
//! - `tabs`: Page content for each route (dashboard, employees, etc.)

pub mod form;
pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
