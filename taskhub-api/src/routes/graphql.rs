/// GraphQL endpoint handlers
///
/// `POST /graphql` executes a GraphQL request against the schema built at
/// startup; the tenant context resolved by the middleware is attached as
/// request data so resolvers receive it explicitly. `GET /graphql` serves
/// the GraphiQL playground.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Extension,
};

use crate::{app::AppState, tenant::TenantContext};

/// GraphQL execution handler
pub async fn graphql_handler(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let req = req.into_inner().data(tenant);
    state.schema.execute(req).await.into()
}

/// GraphiQL playground
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
