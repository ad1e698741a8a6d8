// Core layer - shared configuration and formatting helpers
pub mod core;

// API layer - backend client and wire types
pub mod api;

// Features layer - reminders and sentiment
pub mod features;

// TUI layer - terminal user interface (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

pub use api::{ApiClient, ApiError, ApiResult, ReminderSource};
pub use crate::core::Config;

pub use features::{
    // Reminders
    BannerState, DismissPolicy, PollerHandle, ReminderStore,
    // Sentiment
    Sentiment,
};
