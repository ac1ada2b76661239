//! Request-scoped security context
//!
//! Carries the acting user and the tenant (company) the request operates on.
//! REST handlers obtain it from request headers; in-process callers build it
//! directly with [`SecurityContext::new`].

use crate::problem::Problem;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Header carrying the acting user's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the tenant (company) id
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

/// Identity of the caller for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecurityContext {
    /// Acting user
    pub user_id: Uuid,
    /// Tenant that owns every entity touched by the operation
    pub tenant_id: Uuid,
}

impl SecurityContext {
    pub fn new(user_id: Uuid, tenant_id: Uuid) -> Self {
        Self { user_id, tenant_id }
    }

    /// Same tenant, different acting user
    pub fn as_user(&self, user_id: Uuid) -> Self {
        Self {
            user_id,
            tenant_id: self.tenant_id,
        }
    }
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Uuid, Problem> {
    let raw = parts
        .headers
        .get(name)
        .ok_or_else(|| Problem::unauthorized(format!("missing '{}' header", name)))?;

    let value = raw
        .to_str()
        .map_err(|_| Problem::unauthorized(format!("'{}' header is not valid ASCII", name)))?;

    Uuid::parse_str(value.trim())
        .map_err(|_| Problem::unauthorized(format!("'{}' header is not a UUID", name)))
}

impl<S> FromRequestParts<S> for SecurityContext
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_uuid(parts, USER_ID_HEADER)?;
        let tenant_id = header_uuid(parts, TENANT_ID_HEADER)?;
        Ok(Self { user_id, tenant_id })
    }
}
