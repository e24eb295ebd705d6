//! Entity modules - Domain capability encapsulation.
//!
//! Each module wraps operations for a domain entity type. They depend on
//! repository ports and are what the API layer calls.

pub mod issue;

pub use issue::IssueStore;
