//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Issue persistence (could swap Neo4j -> another graph store)
//! - The note subsystem's "is a note attached?" question

mod error;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{IssueRepo, NoteOracle};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockIssueRepo, MockNoteOracle};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
