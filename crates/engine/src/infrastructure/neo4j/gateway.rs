//! Scoped graph sessions.
//!
//! Every logical operation gets its own transaction through
//! [`Neo4jGateway::with_session`]: begin, run the caller's work, commit on
//! success or roll back on failure. The transaction never escapes the call.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use neo4rs::{query, ConfigBuilder, Graph, Query, Row, Txn};

use crate::infrastructure::ports::RepoError;

/// Shared Neo4j connection pool plus the session discipline around it.
#[derive(Clone)]
pub struct Neo4jGateway {
    graph: Graph,
    query_timeout: Option<Duration>,
}

impl Neo4jGateway {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            query_timeout: None,
        }
    }

    /// Open the pool and verify it answers before handing it out.
    pub async fn connect(uri: &str, user: &str, password: &str, database: &str) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(database)
            .build()?;

        let graph = Graph::connect(config)
            .await
            .with_context(|| format!("Failed to connect to Neo4j at {uri}"))?;
        graph
            .run(query("RETURN 1"))
            .await
            .with_context(|| format!("Neo4j at {uri} did not answer"))?;
        tracing::info!("Connected to Neo4j at {}", uri);

        Ok(Self::new(graph))
    }

    /// Bound every session's work; `None` waits as long as the backend does.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Get a reference to the graph connection
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Run `work` inside a fresh transaction.
    ///
    /// - failing to begin is `StoreUnavailable`
    /// - `Ok` commits; a failed commit is `QueryFailed`
    /// - `Err` or an elapsed timeout rolls back and returns the original error
    ///
    /// If the returned future is dropped midway the transaction is dropped
    /// uncommitted and its connection goes back to the pool.
    pub async fn with_session<T, F>(&self, operation: &'static str, work: F) -> Result<T, RepoError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Txn) -> BoxFuture<'t, Result<T, RepoError>> + Send,
    {
        let start = Instant::now();
        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| RepoError::unavailable(operation, e))?;

        let outcome = match self.query_timeout {
            Some(limit) => match tokio::time::timeout(limit, work(&mut txn)).await {
                Ok(result) => result,
                Err(_) => Err(RepoError::query(
                    operation,
                    format!("timed out after {}ms", limit.as_millis()),
                )),
            },
            None => work(&mut txn).await,
        };

        match outcome {
            Ok(value) => {
                txn.commit()
                    .await
                    .map_err(|e| RepoError::query(operation, e))?;
                tracing::debug!(
                    operation,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Session committed"
                );
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(
                        operation,
                        error = %rollback_err,
                        "Rollback failed after session error"
                    );
                }
                tracing::debug!(operation, error = %err, "Session rolled back");
                Err(err)
            }
        }
    }
}

/// Execute a query inside a session and collect every row.
pub async fn fetch_all(
    txn: &mut Txn,
    q: Query,
    operation: &'static str,
) -> Result<Vec<Row>, RepoError> {
    let mut result = txn
        .execute(q)
        .await
        .map_err(|e| RepoError::query(operation, e))?;

    let mut rows = Vec::new();
    while let Some(row) = result
        .next(txn.handle())
        .await
        .map_err(|e| RepoError::query(operation, e))?
    {
        rows.push(row);
    }
    Ok(rows)
}

/// Execute a write query with no return value inside a session.
pub async fn run(txn: &mut Txn, q: Query, operation: &'static str) -> Result<(), RepoError> {
    txn.run(q).await.map_err(|e| RepoError::query(operation, e))
}
