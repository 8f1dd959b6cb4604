//! Caller identity extractor.
//!
//! Every request resolves to an [`Identity`] before any store access: the
//! tenancy scope, the actor name recorded in audit entries, and the asserted
//! platform role. Two sources exist, in precedence order:
//!
//! 1. A `Bearer` token in the `Authorization` header. The signature is
//!    verified; its claims override the identity headers entirely. A token
//!    that is present but invalid rejects the request with 401.
//! 2. The identity headers: `X-Organization-Id` (absent or `"null"` means
//!    unscoped), `X-User-Name` (defaults to `"System"`), and `X-User-Role`.
//!
//! Header identity is client-asserted and unverified; the token path is the
//! verified upgrade of the same triple.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskflow_core::error::CoreError;
use taskflow_core::roles::Role;
use taskflow_core::scope::Scope;

use crate::auth::token::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Actor recorded when no name is supplied.
pub const DEFAULT_ACTOR: &str = "System";

/// The resolved caller identity.
///
/// ```ignore
/// async fn my_handler(identity: Identity) -> AppResult<Json<()>> {
///     tracing::info!(actor = %identity.actor, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    /// Tenancy scope applied to every read and write.
    pub scope: Scope,
    /// Actor display name recorded in audit entries.
    pub actor: String,
    /// Asserted platform role; `None` when absent or unrecognized.
    pub role: Option<Role>,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        {
            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

            let claims = validate_token(token, &state.config.token).map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

            return Ok(Identity {
                scope: match claims.org {
                    Some(org) => Scope::Org(org),
                    None => Scope::Unscoped,
                },
                actor: claims.name,
                role: claims.role.parse().ok(),
            });
        }

        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        Ok(Identity {
            scope: Scope::resolve(header("x-organization-id")),
            actor: header("x-user-name").unwrap_or(DEFAULT_ACTOR).to_string(),
            role: header("x-user-role").and_then(|raw| raw.parse().ok()),
        })
    }
}
