//! Role-based access control extractors.
//!
//! Each extractor wraps [`Identity`] and rejects requests whose asserted role
//! does not meet the minimum requirement. Use these in route handlers to
//! enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskflow_core::error::CoreError;
use taskflow_core::roles::Role;

use super::identity::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `SuperAdmin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn platform_only(RequireSuperAdmin(identity): RequireSuperAdmin) -> AppResult<Json<()>> {
///     // identity.role is guaranteed to be SuperAdmin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if identity.role != Some(Role::SuperAdmin) {
            return Err(AppError::Core(CoreError::Forbidden(
                "SuperAdmin role required".into(),
            )));
        }
        Ok(RequireSuperAdmin(identity))
    }
}

/// Requires `Admin` or `SuperAdmin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireOrgAdmin(identity): RequireOrgAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOrgAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireOrgAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if identity.role != Some(Role::SuperAdmin) && identity.role != Some(Role::Admin) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin or SuperAdmin role required".into(),
            )));
        }
        Ok(RequireOrgAdmin(identity))
    }
}
