//! Graph-backed answer to "does this issue have a note?".
//!
//! Notes are owned by another subsystem; this adapter only reads the
//! `issueId` property it stamps on its `:Note` nodes.

use async_trait::async_trait;
use issuetrack_domain::IssueId;
use neo4rs::{query, Row};

use super::gateway::{fetch_all, Neo4jGateway};
use crate::infrastructure::ports::{NoteOracle, RepoError};

pub struct Neo4jNoteOracle {
    gateway: Neo4jGateway,
}

impl Neo4jNoteOracle {
    pub fn new(gateway: Neo4jGateway) -> Self {
        Self { gateway }
    }
}

/// The aggregate always yields exactly one row; anything else is a fault,
/// never a "no".
pub(super) fn read_attached(rows: &[Row]) -> Result<bool, RepoError> {
    let row = rows
        .first()
        .ok_or_else(|| RepoError::query("has_note", "count returned no row"))?;
    row.get::<bool>("attached")
        .map_err(|e| RepoError::serialization(format!("column 'attached': {}", e)))
}

#[async_trait]
impl NoteOracle for Neo4jNoteOracle {
    async fn has_note(&self, issue_id: IssueId) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (n:Note {issueId: $issue_id})
            RETURN count(n) > 0 AS attached",
        )
        .param("issue_id", issue_id.to_string());

        self.gateway
            .with_session("has_note", move |txn| {
                Box::pin(async move {
                    let rows = fetch_all(txn, q, "has_note").await?;
                    read_attached(&rows)
                })
            })
            .await
    }
}
