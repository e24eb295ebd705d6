//! Issue entity operations.
//!
//! Wraps the [`IssueRepo`] port and merges the note flag from [`NoteOracle`]
//! into every issue it reads back. Creation and deletion never ask the oracle.

use std::sync::Arc;

use futures_util::future::try_join_all;
use issuetrack_domain::{Issue, IssueId, IssuePatch, NewIssue};

use crate::infrastructure::ports::{IssueRepo, NoteOracle, RepoError};

/// Issue entity operations.
pub struct IssueStore {
    repo: Arc<dyn IssueRepo>,
    notes: Arc<dyn NoteOracle>,
}

impl IssueStore {
    pub fn new(repo: Arc<dyn IssueRepo>, notes: Arc<dyn NoteOracle>) -> Self {
        Self { repo, notes }
    }

    pub async fn get_issue(&self, id: IssueId) -> Result<Issue, RepoError> {
        let issue = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| RepoError::not_found("Issue", id))?;
        self.enrich(issue).await
    }

    /// Every issue, in no particular order. Note lookups run concurrently and
    /// the first failing lookup fails the whole listing.
    pub async fn list_issues(&self) -> Result<Vec<Issue>, RepoError> {
        let issues = self.repo.list().await?;
        try_join_all(issues.into_iter().map(|issue| self.enrich(issue))).await
    }

    pub async fn create_issue(&self, issue: NewIssue) -> Result<Issue, RepoError> {
        let created = self.repo.create(&issue).await?;
        tracing::info!(issue_id = %created.id, "Issue created");
        Ok(created)
    }

    pub async fn update_issue(&self, id: IssueId, patch: IssuePatch) -> Result<Issue, RepoError> {
        let updated = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| RepoError::not_found("Issue", id))?;
        tracing::info!(issue_id = %id, "Issue updated");
        self.enrich(updated).await
    }

    /// Succeeds even when nothing carried `id`; callers cannot tell the two apart.
    pub async fn delete_issue(&self, id: IssueId) -> Result<(), RepoError> {
        self.repo.delete(id).await?;
        tracing::info!(issue_id = %id, "Issue deleted");
        Ok(())
    }

    async fn enrich(&self, issue: Issue) -> Result<Issue, RepoError> {
        let attached = self.notes.has_note(issue.id).await?;
        Ok(issue.with_note_attached(attached))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockIssueRepo, MockNoteOracle};
    use chrono::{FixedOffset, TimeZone};
    use mockall::{predicate::eq, Sequence};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn new_issue(name: &str) -> NewIssue {
        let raised = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 2, 14, 8, 0, 0)
            .unwrap();
        NewIssue::new(name, raised)
            .with_description("Found during inspection")
            .with_status("Open")
    }

    fn stored(name: &str) -> Issue {
        Issue::from_new(IssueId::from_uuid(Uuid::new_v4()), new_issue(name))
    }

    fn store(repo: MockIssueRepo, notes: MockNoteOracle) -> IssueStore {
        IssueStore::new(Arc::new(repo), Arc::new(notes))
    }

    #[tokio::test]
    async fn get_merges_note_flag() {
        let issue = stored("Leak");
        let id = issue.id;

        let mut repo = MockIssueRepo::new();
        let found = issue.clone();
        repo.expect_get()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        let mut notes = MockNoteOracle::new();
        notes
            .expect_has_note()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let result = store(repo, notes).get_issue(id).await.unwrap();

        assert!(result.note_attached);
        assert_eq!(result.name, issue.name);
    }

    #[tokio::test]
    async fn get_missing_is_not_found_and_skips_oracle() {
        let id = IssueId::from_uuid(Uuid::new_v4());
        let mut repo = MockIssueRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().never();

        let err = store(repo, notes).get_issue(id).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn note_flag_is_never_cached_between_reads() {
        let issue = stored("Flaky sensor");
        let id = issue.id;

        let mut repo = MockIssueRepo::new();
        repo.expect_get()
            .times(2)
            .returning(move |_| Ok(Some(issue.clone())));
        let mut notes = MockNoteOracle::new();
        let mut seq = Sequence::new();
        notes
            .expect_has_note()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        notes
            .expect_has_note()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        let store = store(repo, notes);

        assert!(store.get_issue(id).await.unwrap().note_attached);
        assert!(!store.get_issue(id).await.unwrap().note_attached);
    }

    #[tokio::test]
    async fn list_enriches_each_issue_independently() {
        let issues: Vec<Issue> = ["a", "b", "c"].iter().map(|n| stored(n)).collect();
        let with_note = issues[1].id;
        let ids: HashSet<IssueId> = issues.iter().map(|i| i.id).collect();

        let mut repo = MockIssueRepo::new();
        repo.expect_list()
            .times(1)
            .returning(move || Ok(issues.clone()));
        let mut notes = MockNoteOracle::new();
        notes
            .expect_has_note()
            .times(3)
            .returning(move |id| Ok(id == with_note));

        let listed = store(repo, notes).list_issues().await.unwrap();

        assert_eq!(listed.len(), 3);
        assert_eq!(listed.iter().map(|i| i.id).collect::<HashSet<_>>(), ids);
        for issue in &listed {
            assert_eq!(issue.note_attached, issue.id == with_note);
        }
    }

    #[tokio::test]
    async fn list_fails_when_any_note_lookup_fails() {
        let issues = vec![stored("a"), stored("b")];
        let failing = issues[0].id;

        let mut repo = MockIssueRepo::new();
        repo.expect_list().returning(move || Ok(issues.clone()));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().returning(move |id| {
            if id == failing {
                Err(RepoError::unavailable("has_note", "connection refused"))
            } else {
                Ok(false)
            }
        });

        let err = store(repo, notes).list_issues().await.unwrap_err();
        assert!(matches!(err, RepoError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn empty_list_needs_no_oracle() {
        let mut repo = MockIssueRepo::new();
        repo.expect_list().returning(|| Ok(Vec::new()));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().never();

        assert!(store(repo, notes).list_issues().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_returns_store_assigned_record_without_oracle() {
        let payload = new_issue("Door jammed");
        let assigned = IssueId::from_uuid(Uuid::new_v4());

        let mut repo = MockIssueRepo::new();
        let expected = payload.clone();
        repo.expect_create()
            .withf(move |issue| *issue == expected)
            .times(1)
            .returning(move |issue| Ok(Issue::from_new(assigned, issue.clone())));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().never();

        let created = store(repo, notes).create_issue(payload.clone()).await.unwrap();

        assert_eq!(created.id, assigned);
        assert_eq!(created.name, payload.name);
        assert!(!created.note_attached);
    }

    #[tokio::test]
    async fn update_passes_patch_through_and_enriches_result() {
        let mut issue = stored("Noisy fan");
        let id = issue.id;
        let patch = IssuePatch::new().with_status("Closed");
        patch.apply(&mut issue);

        let mut repo = MockIssueRepo::new();
        let expected_patch = patch.clone();
        repo.expect_update()
            .withf(move |got_id, got_patch| *got_id == id && *got_patch == expected_patch)
            .times(1)
            .returning(move |_, _| Ok(Some(issue.clone())));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().times(1).returning(|_| Ok(true));

        let updated = store(repo, notes).update_issue(id, patch).await.unwrap();

        assert_eq!(updated.status, "Closed");
        assert_eq!(updated.description, "Found during inspection");
        assert!(updated.note_attached);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let mut repo = MockIssueRepo::new();
        repo.expect_update().returning(|_, _| Ok(None));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().never();

        let err = store(repo, notes)
            .update_issue(IssueId::from_uuid(Uuid::new_v4()), IssuePatch::new().with_owner("x"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_never_asks_oracle_and_swallows_nothing() {
        let id = IssueId::from_uuid(Uuid::new_v4());
        let mut repo = MockIssueRepo::new();
        repo.expect_delete().with(eq(id)).times(1).returning(|_| Ok(()));
        let mut notes = MockNoteOracle::new();
        notes.expect_has_note().never();

        store(repo, notes).delete_issue(id).await.unwrap();
    }

    #[tokio::test]
    async fn backend_faults_propagate_unchanged() {
        let mut repo = MockIssueRepo::new();
        repo.expect_delete()
            .returning(|_| Err(RepoError::query("delete_issue", "timed out after 50ms")));
        repo.expect_get()
            .returning(|id| Err(RepoError::corruption("Issue", id, 2)));
        let store = store(repo, MockNoteOracle::new());
        let id = IssueId::from_uuid(Uuid::new_v4());

        let err = store.delete_issue(id).await.unwrap_err();
        assert!(matches!(err, RepoError::QueryFailed { .. }));
        assert!(err.is_retryable());

        let err = store.get_issue(id).await.unwrap_err();
        assert!(matches!(err, RepoError::Corruption { matches: 2, .. }));
    }
}
