//! Supabase bearer-token extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use charasphere_core::error::CoreError;
use charasphere_core::types::UserId;

use crate::auth::supabase::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from the `Authorization: Bearer <jwt>` header.
///
/// Any handler that touches player data takes this extractor; the user id
/// always comes from the verified token, never from the request body.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Supabase auth user id (`claims.sub`).
    pub user_id: UserId,
}

impl AuthUser {
    /// Reject a request whose body names a different user than the token.
    ///
    /// Clients historically sent `userId` in the body; it is accepted but
    /// must agree with the token.
    pub fn ensure_matches(&self, claimed: Option<UserId>) -> Result<(), AppError> {
        match claimed {
            Some(claimed) if claimed != self.user_id => {
                tracing::warn!(
                    user_id = %self.user_id,
                    claimed = %claimed,
                    "Request body user id does not match token",
                );
                Err(AppError::Core(CoreError::Forbidden(
                    "userId does not match the authenticated user".into(),
                )))
            }
            _ => Ok(()),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
