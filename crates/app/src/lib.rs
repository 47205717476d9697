//! `deskerp-app`: the dashboard workspace.
//!
//! Owns one book per screen, the settings and the activity log, and is the
//! single entry point the UI shell calls with plain form data.

pub mod dashboard;
pub mod dispatch;
pub mod event;
pub mod seed;
pub mod sheets;
pub mod workspace;

pub use dashboard::{DashboardSummary, RecentOrder};
pub use dispatch::WorkspaceError;
pub use event::WorkspaceEvent;
pub use workspace::Workspace;
