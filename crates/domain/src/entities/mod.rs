//! Domain entities.

mod issue;

pub use issue::{Issue, IssuePatch, NewIssue};
