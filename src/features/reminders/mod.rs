//! # Reminders Feature
//!
//! Due-reminder synchronization: a poller feeds the store, and the banner
//! and sidebar project the stored set.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod banner;
pub mod poller;
pub mod sidebar;
pub mod store;

pub use banner::{BannerEntry, BannerState, BannerView, DismissPolicy};
pub use poller::{poll_once, start as start_polling, PollerHandle};
pub use sidebar::{annotate, due_ids, SidebarEntry};
pub use store::{PollOutcome, ReminderSnapshot, ReminderStore, RequestToken};
