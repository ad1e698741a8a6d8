//! # Features
//!
//! Client-side behaviour built on top of the API layer.

pub mod reminders;
pub mod sentiment;

pub use reminders::{BannerState, DismissPolicy, PollerHandle, ReminderStore};
pub use sentiment::Sentiment;
