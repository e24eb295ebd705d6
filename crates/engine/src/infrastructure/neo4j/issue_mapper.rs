//! Issue <-> `:Issue` node property mapping.
//!
//! `id` is server-assigned and is only ever read, never written from here.
//! `noteAttached` is derived and never appears on the node.

use issuetrack_domain::common::{epoch, format_datetime};
use issuetrack_domain::{Issue, IssueId, IssuePatch, NewIssue};
use neo4rs::{BoltMap, Node, Row};

use super::helpers::{BoltMapExt, PropertySource};
use crate::infrastructure::ports::RepoError;

/// Persisted property names on `:Issue` nodes.
pub mod props {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PRIORITY: &str = "priority";
    pub const CATEGORY: &str = "category";
    pub const STATUS: &str = "status";
    pub const ACTIONS_TO_RESOLVE: &str = "actionsToResolve";
    pub const OWNER: &str = "owner";
    pub const ESCALATE_TO: &str = "escalateTo";
    pub const ESCALATION_STATUS: &str = "escalationStatus";
    pub const LATEST_UPDATE: &str = "latestUpdate";
    pub const DATE_RAISED: &str = "dateRaised";
    pub const TARGET_RESOLUTION_DATE: &str = "targetResolutionDate";
    pub const DATE_RESOLVED: &str = "dateResolved";
    pub const LAST_REVIEW_DATE: &str = "lastReviewDate";
    pub const NEXT_REVIEW_DATE: &str = "nextReviewDate";
}

/// Property map for a new node. Unset optional dates are left out.
pub fn to_properties(issue: &NewIssue) -> BoltMap {
    let mut map = BoltMap::new();
    map.put_str(props::NAME, issue.name.as_str());
    map.put_str(props::DESCRIPTION, issue.description.as_str());
    map.put_str(props::PRIORITY, issue.priority.as_str());
    map.put_str(props::CATEGORY, issue.category.as_str());
    map.put_str(props::STATUS, issue.status.as_str());
    map.put_str(props::ACTIONS_TO_RESOLVE, issue.actions_to_resolve.as_str());
    map.put_str(props::OWNER, issue.owner.as_str());
    map.put_str(props::ESCALATE_TO, issue.escalate_to.as_str());
    map.put_str(props::ESCALATION_STATUS, issue.escalation_status.as_str());
    map.put_str(props::LATEST_UPDATE, issue.latest_update.as_str());
    map.put_str(props::DATE_RAISED, format_datetime(&issue.date_raised));
    map.put_opt(
        props::TARGET_RESOLUTION_DATE,
        issue.target_resolution_date.as_ref().map(format_datetime),
    );
    map.put_opt(
        props::DATE_RESOLVED,
        issue.date_resolved.as_ref().map(format_datetime),
    );
    map.put_opt(
        props::LAST_REVIEW_DATE,
        issue.last_review_date.as_ref().map(format_datetime),
    );
    map.put_opt(
        props::NEXT_REVIEW_DATE,
        issue.next_review_date.as_ref().map(format_datetime),
    );
    map
}

/// Property map holding only the fields a patch supplies, for `SET n += $patch`.
pub fn patch_properties(patch: &IssuePatch) -> BoltMap {
    let mut map = BoltMap::new();
    map.put_opt(props::NAME, patch.name.clone());
    map.put_opt(props::DESCRIPTION, patch.description.clone());
    map.put_opt(props::PRIORITY, patch.priority.clone());
    map.put_opt(props::CATEGORY, patch.category.clone());
    map.put_opt(props::STATUS, patch.status.clone());
    map.put_opt(props::ACTIONS_TO_RESOLVE, patch.actions_to_resolve.clone());
    map.put_opt(props::OWNER, patch.owner.clone());
    map.put_opt(props::ESCALATE_TO, patch.escalate_to.clone());
    map.put_opt(props::ESCALATION_STATUS, patch.escalation_status.clone());
    map.put_opt(props::LATEST_UPDATE, patch.latest_update.clone());
    map.put_opt(props::DATE_RAISED, patch.date_raised.as_ref().map(format_datetime));
    map.put_opt(
        props::TARGET_RESOLUTION_DATE,
        patch.target_resolution_date.as_ref().map(format_datetime),
    );
    map.put_opt(
        props::DATE_RESOLVED,
        patch.date_resolved.as_ref().map(format_datetime),
    );
    map.put_opt(
        props::LAST_REVIEW_DATE,
        patch.last_review_date.as_ref().map(format_datetime),
    );
    map.put_opt(
        props::NEXT_REVIEW_DATE,
        patch.next_review_date.as_ref().map(format_datetime),
    );
    map
}

/// Rebuild an issue from stored properties.
///
/// Absent text reads as empty and absent optional dates as `None`. Only a
/// missing or malformed `id` is an error.
pub fn from_properties(source: &impl PropertySource) -> Result<Issue, RepoError> {
    let raw_id = source
        .get_optional_string(props::ID)
        .ok_or_else(|| RepoError::serialization("Issue node has no id"))?;
    let id: IssueId = raw_id
        .parse()
        .map_err(|e| RepoError::serialization(format!("Issue node id: {}", e)))?;

    let date_raised = source
        .get_optional_datetime(props::DATE_RAISED)
        .unwrap_or_else(|| {
            tracing::warn!(issue_id = %id, "Issue node has no usable dateRaised, using epoch");
            epoch()
        });

    Ok(Issue {
        id,
        name: source.get_string_or(props::NAME, ""),
        description: source.get_string_or(props::DESCRIPTION, ""),
        priority: source.get_string_or(props::PRIORITY, ""),
        category: source.get_string_or(props::CATEGORY, ""),
        status: source.get_string_or(props::STATUS, ""),
        actions_to_resolve: source.get_string_or(props::ACTIONS_TO_RESOLVE, ""),
        owner: source.get_string_or(props::OWNER, ""),
        escalate_to: source.get_string_or(props::ESCALATE_TO, ""),
        escalation_status: source.get_string_or(props::ESCALATION_STATUS, ""),
        latest_update: source.get_string_or(props::LATEST_UPDATE, ""),
        date_raised,
        target_resolution_date: source.get_optional_datetime(props::TARGET_RESOLUTION_DATE),
        date_resolved: source.get_optional_datetime(props::DATE_RESOLVED),
        last_review_date: source.get_optional_datetime(props::LAST_REVIEW_DATE),
        next_review_date: source.get_optional_datetime(props::NEXT_REVIEW_DATE),
        note_attached: false,
    })
}

/// Convert a row holding an Issue node under `column`.
pub fn from_row(row: &Row, column: &str) -> Result<Issue, RepoError> {
    let node: Node = row
        .get(column)
        .map_err(|e| RepoError::serialization(format!("column '{}': {}", column, e)))?;
    from_properties(&node)
}
