//! # TUI Module
//!
//! Terminal user interface for tracking resolutions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Dashboard, resolution detail and help screens with reminder sidebar

pub mod app;
pub mod event;
pub mod state;
pub mod ui;

pub use app::{App, InputMode, Request, Screen};
pub use event::{ApiEvent, Event, EventHandler, KeyAction};
