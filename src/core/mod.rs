//! # Core Module
//!
//! Configuration and shared text/date helpers for the resolutions client.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial creation with config and format modules

pub mod config;
pub mod format;

// Re-export commonly used items
pub use config::Config;
pub use format::{days_overdue, format_date, leading_date, pluralize, truncate_text};
