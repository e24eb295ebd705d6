//! Neo4j database implementations.

mod gateway;
mod helpers;
mod issue_mapper;
mod issue_repo;
mod note_oracle;
mod schema;

#[cfg(test)]
pub(crate) mod test_harness;


pub use gateway::Neo4jGateway;
pub use issue_repo::Neo4jIssueRepo;
pub use note_oracle::Neo4jNoteOracle;
pub use schema::ensure_schema;

/// Create all Neo4j-backed ports from one gateway.
pub struct Neo4jRepositories {
    pub issue: Neo4jIssueRepo,
    pub notes: Neo4jNoteOracle,
}

impl Neo4jRepositories {
    pub fn new(gateway: Neo4jGateway) -> Self {
        Self {
            issue: Neo4jIssueRepo::new(gateway.clone()),
            notes: Neo4jNoteOracle::new(gateway),
        }
    }
}
