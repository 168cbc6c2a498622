/// Tenant resolution from the `X-Organization-Slug` header
///
/// Every request passes through [`resolve_tenant`], which maps the optional
/// header to a [`TenantContext`] in the request extensions. A missing header,
/// an unknown slug, or an inactive organization all resolve to "no tenant",
/// which is a valid state, not an error. Queries against it return empty
/// results; mutations report "Organization required". Only an infrastructure
/// failure (the lookup query itself erroring) surfaces as an HTTP error.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use taskhub_shared::models::organization::Organization;

use crate::{app::AppState, error::ApiError};

/// Header carrying the tenant slug
pub const TENANT_HEADER: &str = "x-organization-slug";

/// Tenant context threaded through every query and mutation
///
/// Wraps the resolved organization explicitly; resolvers receive this value
/// from the GraphQL context data, never from ambient state.
#[derive(Debug, Clone, Default)]
pub struct TenantContext(Option<Organization>);

impl TenantContext {
    /// Context for a request that resolved to an active organization
    pub fn resolved(organization: Organization) -> Self {
        TenantContext(Some(organization))
    }

    /// Context for a request with no resolvable tenant
    pub fn unresolved() -> Self {
        TenantContext(None)
    }

    /// The resolved organization, if any
    pub fn organization(&self) -> Option<&Organization> {
        self.0.as_ref()
    }
}

/// Tenant resolver middleware
///
/// Reads the slug header, looks up an active organization, and inserts the
/// resulting [`TenantContext`] into the request extensions for the GraphQL
/// handler to pick up.
pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let slug = req
        .headers()
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let tenant = match slug {
        Some(slug) => match Organization::find_active_by_slug(&state.db, &slug).await? {
            Some(organization) => {
                tracing::debug!(slug = %slug, organization_id = %organization.id, "Tenant resolved");
                TenantContext::resolved(organization)
            }
            None => {
                // Unknown or inactive slug is not an error at this layer
                tracing::debug!(slug = %slug, "No active organization for slug");
                TenantContext::unresolved()
            }
        },
        None => TenantContext::unresolved(),
    };

    req.extensions_mut().insert(tenant);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_organization() -> Organization {
        Organization {
            id: Uuid::new_v4(),
            name: "Test Org".to_string(),
            slug: "test-org".to_string(),
            contact_email: "admin@test.org".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_unresolved_context() {
        let ctx = TenantContext::unresolved();
        assert!(ctx.organization().is_none());
    }

    #[test]
    fn test_resolved_context() {
        let ctx = TenantContext::resolved(sample_organization());
        assert_eq!(ctx.organization().unwrap().slug, "test-org");
    }

    #[test]
    fn test_default_is_unresolved() {
        assert!(TenantContext::default().organization().is_none());
    }
}
