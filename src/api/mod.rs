//! # API Module
//!
//! Typed access to the resolutions REST backend.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial client with resolution, check-in, reminder and dashboard endpoints

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ReminderSource};
pub use error::{ApiError, ApiResult};
pub use types::{
    CheckIn, CheckInCreate, DashboardSummary, DueReminder, Frequency, Reminder, ReminderUpdate,
    Resolution, ResolutionCreate, ResolutionDetail, ResolutionStatus, ResolutionUpdate,
};
