//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The backend rejected or could not finish a query (includes timeouts).
    #[error("Query failed in {operation}: {message}")]
    QueryFailed {
        operation: &'static str,
        message: String,
    },

    /// No session could be opened against the backend.
    #[error("Store unavailable in {operation}: {message}")]
    StoreUnavailable {
        operation: &'static str,
        message: String,
    },

    /// More than one node matched an id that must be unique.
    #[error("Corrupt store: {matches} {entity_type} nodes share id {id}")]
    Corruption {
        entity_type: &'static str,
        id: String,
        matches: usize,
    },

    /// A stored node could not be turned back into a domain value.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a QueryFailed error with operation context.
    pub fn query(operation: &'static str, message: impl ToString) -> Self {
        Self::QueryFailed {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a StoreUnavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::StoreUnavailable {
            operation,
            message: message.to_string(),
        }
    }

    pub fn corruption(entity_type: &'static str, id: impl ToString, matches: usize) -> Self {
        Self::Corruption {
            entity_type,
            id: id.to_string(),
            matches,
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Faults a caller may reasonably retry with backoff. Nothing retries internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QueryFailed { .. } | Self::StoreUnavailable { .. })
    }
}
