//! Repository port traits for database access.

use async_trait::async_trait;
use issuetrack_domain::{Issue, IssueId, IssuePatch, NewIssue};

use super::error::RepoError;

// =============================================================================
// Database Ports
// =============================================================================

/// Graph persistence for issues.
///
/// Every method runs in its own short-lived session. Issues returned here
/// always have `note_attached == false`; enrichment happens above this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepo: Send + Sync {
    /// `Ok(None)` when no node carries `id`.
    async fn get(&self, id: IssueId) -> Result<Option<Issue>, RepoError>;

    /// Every issue, unordered and unpaginated.
    async fn list(&self) -> Result<Vec<Issue>, RepoError>;

    /// Write a new node; the backend assigns the id inside the same write.
    async fn create(&self, issue: &NewIssue) -> Result<Issue, RepoError>;

    /// Merge `patch` onto the node; `Ok(None)` when no node carries `id`.
    async fn update(&self, id: IssueId, patch: &IssuePatch) -> Result<Option<Issue>, RepoError>;

    /// Detach-delete. Succeeds whether or not a node existed.
    async fn delete(&self, id: IssueId) -> Result<(), RepoError>;
}

// =============================================================================
// Cross-entity Ports
// =============================================================================

/// Answers whether the note subsystem holds a note for an issue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteOracle: Send + Sync {
    async fn has_note(&self, issue_id: IssueId) -> Result<bool, RepoError>;
}
