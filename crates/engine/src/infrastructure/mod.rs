//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod neo4j;
pub mod ports;
