//! UI rendering module for Skycast
//!
//! All terminal rendering lives here, built on the ratatui library: the
//! dashboard with its cards, the city search view, and the help overlay.

pub mod dashboard;
pub mod help_overlay;
pub mod search;
pub mod widgets;

pub use dashboard::render as render_dashboard;
pub use help_overlay::render as render_help_overlay;
pub use search::render as render_search;
