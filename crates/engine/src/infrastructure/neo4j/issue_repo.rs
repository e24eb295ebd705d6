//! Neo4j issue repository implementation.
//!
//! Issues are standalone `:Issue` nodes keyed by a backend-generated `id`.
//! Other subsystems may hang relationships off them; delete removes those too.

use async_trait::async_trait;
use issuetrack_domain::{Issue, IssueId, IssuePatch, NewIssue};
use neo4rs::{query, BoltType, Row};

use super::gateway::{fetch_all, run, Neo4jGateway};
use super::issue_mapper;
use crate::infrastructure::ports::{IssueRepo, RepoError};

const ENTITY: &str = "Issue";

/// Repository for Issue operations.
pub struct Neo4jIssueRepo {
    gateway: Neo4jGateway,
}

impl Neo4jIssueRepo {
    pub fn new(gateway: Neo4jGateway) -> Self {
        Self { gateway }
    }
}

/// Reduce the rows of a by-id match. Ids are unique, so more than one row
/// means the store is inconsistent.
fn at_most_one(rows: Vec<Row>, id: IssueId) -> Result<Option<Issue>, RepoError> {
    match rows.len() {
        0 => Ok(None),
        1 => rows
            .first()
            .map(|row| issue_mapper::from_row(row, "i"))
            .transpose(),
        matches => {
            tracing::error!(
                issue_id = %id,
                matches,
                "Multiple Issue nodes share one id"
            );
            Err(RepoError::corruption(ENTITY, id, matches))
        }
    }
}

#[async_trait]
impl IssueRepo for Neo4jIssueRepo {
    async fn get(&self, id: IssueId) -> Result<Option<Issue>, RepoError> {
        let q = query("MATCH (i:Issue {id: $id}) RETURN i").param("id", id.to_string());

        self.gateway
            .with_session("get_issue", move |txn| {
                Box::pin(async move {
                    let rows = fetch_all(txn, q, "get_issue").await?;
                    at_most_one(rows, id)
                })
            })
            .await
    }

    async fn list(&self) -> Result<Vec<Issue>, RepoError> {
        let q = query("MATCH (i:Issue) RETURN i");

        let issues = self
            .gateway
            .with_session("list_issues", move |txn| {
                Box::pin(async move {
                    let rows = fetch_all(txn, q, "list_issues").await?;
                    rows.iter()
                        .map(|row| issue_mapper::from_row(row, "i"))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .await?;

        tracing::debug!(count = issues.len(), "Listed issues");
        Ok(issues)
    }

    async fn create(&self, issue: &NewIssue) -> Result<Issue, RepoError> {
        let q = query(
            "CREATE (i:Issue $props)
            SET i.id = randomUUID()
            RETURN i",
        )
        .param("props", BoltType::Map(issue_mapper::to_properties(issue)));

        let created = self
            .gateway
            .with_session("create_issue", move |txn| {
                Box::pin(async move {
                    let rows = fetch_all(txn, q, "create_issue").await?;
                    let row = rows
                        .first()
                        .ok_or_else(|| RepoError::query("create_issue", "CREATE returned no row"))?;
                    issue_mapper::from_row(row, "i")
                })
            })
            .await?;

        tracing::debug!(issue_id = %created.id, name = %created.name, "Created issue");
        Ok(created)
    }

    async fn update(&self, id: IssueId, patch: &IssuePatch) -> Result<Option<Issue>, RepoError> {
        let q = query(
            "MATCH (i:Issue {id: $id})
            SET i += $patch
            RETURN i",
        )
        .param("id", id.to_string())
        .param("patch", BoltType::Map(issue_mapper::patch_properties(patch)));

        if patch.is_empty() {
            tracing::debug!(issue_id = %id, "Empty patch, node will be returned unchanged");
        }

        // A corrupt multi-match returns Err here, so the session rolls the SET back.
        self.gateway
            .with_session("update_issue", move |txn| {
                Box::pin(async move {
                    let rows = fetch_all(txn, q, "update_issue").await?;
                    at_most_one(rows, id)
                })
            })
            .await
    }

    async fn delete(&self, id: IssueId) -> Result<(), RepoError> {
        let q = query("MATCH (i:Issue {id: $id}) DETACH DELETE i").param("id", id.to_string());

        self.gateway
            .with_session("delete_issue", move |txn| {
                Box::pin(async move { run(txn, q, "delete_issue").await })
            })
            .await?;

        tracing::debug!(issue_id = %id, "Deleted issue (if present)");
        Ok(())
    }
}
