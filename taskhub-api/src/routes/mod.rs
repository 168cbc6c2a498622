/// HTTP route handlers
///
/// - `health`: liveness check
/// - `graphql`: the GraphQL endpoint and playground

pub mod graphql;
pub mod health;

use crate::error::ApiError;

/// Fallback for requests that match no route
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_not_found_fallback() {
        let resp = not_found().await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
