/// GraphQL schema
///
/// The schema is built exactly once at startup, with the database pool as
/// schema-level data, and handed to the router explicitly. Per-request data
/// (the [`TenantContext`](crate::tenant::TenantContext)) is attached by the
/// `/graphql` handler.
///
/// - `types`: object types, enums, and mutation payloads
/// - `queries`: the query root
/// - `mutations`: the mutation root

pub mod mutations;
pub mod queries;
pub mod types;

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use mutations::MutationRoot;
use queries::QueryRoot;

/// The application's GraphQL schema type
pub type TaskHubSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the database pool as context data
pub fn build_schema(pool: PgPool) -> TaskHubSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .finish()
}
