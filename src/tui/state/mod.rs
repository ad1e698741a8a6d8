//! # TUI State Management
//!
//! State for the dashboard, the open resolution and text-entry forms.

mod dashboard;
mod detail;
mod form;

pub use dashboard::DashboardState;
pub use detail::DetailState;
pub use form::{Field, FormKind, FormState, FormSubmission};
