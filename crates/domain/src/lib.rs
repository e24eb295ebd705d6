//! Issue tracking domain types.
//!
//! Pure data: no I/O and no knowledge of how issues are persisted.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{Issue, IssuePatch, NewIssue};
pub use error::DomainError;
pub use ids::IssueId;
