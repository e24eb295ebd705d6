//! Issue entity - tracked problems with owners, escalation and review dates
//!
//! Three shapes exist for the same record:
//! - [`Issue`] is what the store hands back, with a server-assigned id and the
//!   derived `note_attached` flag
//! - [`NewIssue`] is the creation payload and has no id at all
//! - [`IssuePatch`] is a sparse update where `None` means "leave unchanged"

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::IssueId;

/// A stored issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub name: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub status: String,
    pub actions_to_resolve: String,
    pub owner: String,
    pub escalate_to: String,
    pub escalation_status: String,
    pub latest_update: String,
    pub date_raised: DateTime<FixedOffset>,
    pub target_resolution_date: Option<DateTime<FixedOffset>>,
    pub date_resolved: Option<DateTime<FixedOffset>>,
    pub last_review_date: Option<DateTime<FixedOffset>>,
    pub next_review_date: Option<DateTime<FixedOffset>>,
    /// Derived at read time from the note subsystem. Never persisted.
    pub note_attached: bool,
}

impl Issue {
    /// Build the record a store would return right after writing `new` under `id`.
    pub fn from_new(id: IssueId, new: NewIssue) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            priority: new.priority,
            category: new.category,
            status: new.status,
            actions_to_resolve: new.actions_to_resolve,
            owner: new.owner,
            escalate_to: new.escalate_to,
            escalation_status: new.escalation_status,
            latest_update: new.latest_update,
            date_raised: new.date_raised,
            target_resolution_date: new.target_resolution_date,
            date_resolved: new.date_resolved,
            last_review_date: new.last_review_date,
            next_review_date: new.next_review_date,
            note_attached: false,
        }
    }

    pub fn with_note_attached(mut self, attached: bool) -> Self {
        self.note_attached = attached;
        self
    }
}

/// Creation payload. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub actions_to_resolve: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub escalate_to: String,
    #[serde(default)]
    pub escalation_status: String,
    #[serde(default)]
    pub latest_update: String,
    pub date_raised: DateTime<FixedOffset>,
    #[serde(default)]
    pub target_resolution_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub date_resolved: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub last_review_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub next_review_date: Option<DateTime<FixedOffset>>,
}

impl NewIssue {
    pub fn new(name: impl Into<String>, date_raised: DateTime<FixedOffset>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            priority: String::new(),
            category: String::new(),
            status: String::new(),
            actions_to_resolve: String::new(),
            owner: String::new(),
            escalate_to: String::new(),
            escalation_status: String::new(),
            latest_update: String::new(),
            date_raised,
            target_resolution_date: None,
            date_resolved: None,
            last_review_date: None,
            next_review_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_escalation(
        mut self,
        escalate_to: impl Into<String>,
        escalation_status: impl Into<String>,
    ) -> Self {
        self.escalate_to = escalate_to.into();
        self.escalation_status = escalation_status.into();
        self
    }

    pub fn with_actions_to_resolve(mut self, actions: impl Into<String>) -> Self {
        self.actions_to_resolve = actions.into();
        self
    }

    pub fn with_latest_update(mut self, update: impl Into<String>) -> Self {
        self.latest_update = update.into();
        self
    }

    pub fn with_target_resolution_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.target_resolution_date = Some(date);
        self
    }

    pub fn with_review_dates(
        mut self,
        last: Option<DateTime<FixedOffset>>,
        next: Option<DateTime<FixedOffset>>,
    ) -> Self {
        self.last_review_date = last;
        self.next_review_date = next;
        self
    }
}

/// Sparse update: every `Some` field overwrites the stored value, every
/// `None` field leaves it as it is.
///
/// Clearing an optional date is not expressible; a patch can only set values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub actions_to_resolve: Option<String>,
    pub owner: Option<String>,
    pub escalate_to: Option<String>,
    pub escalation_status: Option<String>,
    pub latest_update: Option<String>,
    pub date_raised: Option<DateTime<FixedOffset>>,
    pub target_resolution_date: Option<DateTime<FixedOffset>>,
    pub date_resolved: Option<DateTime<FixedOffset>>,
    pub last_review_date: Option<DateTime<FixedOffset>>,
    pub next_review_date: Option<DateTime<FixedOffset>>,
}

impl IssuePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_latest_update(mut self, update: impl Into<String>) -> Self {
        self.latest_update = Some(update.into());
        self
    }

    pub fn with_date_resolved(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date_resolved = Some(date);
        self
    }

    /// True when applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to an in-memory issue with the same merge rule the store uses.
    pub fn apply(&self, issue: &mut Issue) {
        fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn merge_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *target = value.clone();
            }
        }

        merge(&mut issue.name, &self.name);
        merge(&mut issue.description, &self.description);
        merge(&mut issue.priority, &self.priority);
        merge(&mut issue.category, &self.category);
        merge(&mut issue.status, &self.status);
        merge(&mut issue.actions_to_resolve, &self.actions_to_resolve);
        merge(&mut issue.owner, &self.owner);
        merge(&mut issue.escalate_to, &self.escalate_to);
        merge(&mut issue.escalation_status, &self.escalation_status);
        merge(&mut issue.latest_update, &self.latest_update);
        merge(&mut issue.date_raised, &self.date_raised);
        merge_opt(&mut issue.target_resolution_date, &self.target_resolution_date);
        merge_opt(&mut issue.date_resolved, &self.date_resolved);
        merge_opt(&mut issue.last_review_date, &self.last_review_date);
        merge_opt(&mut issue.next_review_date, &self.next_review_date);
    }
}
