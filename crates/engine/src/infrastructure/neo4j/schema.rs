//! Neo4j schema initialization - constraints.

use neo4rs::query;

use super::Neo4jGateway;

/// Ensure the constraints the issue store relies on.
///
/// Called once on startup. Constraints are created with IF NOT EXISTS to be
/// idempotent.
pub async fn ensure_schema(gateway: &Neo4jGateway) -> Result<(), neo4rs::Error> {
    // Ids come from randomUUID(); the constraint turns a collision into a
    // failed write instead of a second node.
    gateway
        .graph()
        .run(query(
            "CREATE CONSTRAINT issue_id IF NOT EXISTS
             FOR (i:Issue) REQUIRE i.id IS UNIQUE",
        ))
        .await?;

    tracing::info!("Neo4j schema initialized (constraints ensured)");
    Ok(())
}
