//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, status bar, loading screen and overlays
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling
//! - `tabs`: per-tab content (dashboard and the four entity tables)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
