//! Application state and composition.

use std::sync::Arc;

use crate::entities::IssueStore;
use crate::infrastructure::{
    neo4j::Neo4jRepositories,
    ports::{IssueRepo, NoteOracle},
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub issues: IssueStore,
}

impl App {
    pub fn new(repos: Neo4jRepositories) -> Self {
        Self::from_ports(Arc::new(repos.issue), Arc::new(repos.notes))
    }

    /// Compose from already-built ports (tests inject mocks here).
    pub fn from_ports(issue_repo: Arc<dyn IssueRepo>, notes: Arc<dyn NoteOracle>) -> Self {
        Self {
            issues: IssueStore::new(issue_repo, notes),
        }
    }
}
