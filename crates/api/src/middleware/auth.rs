//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use topicvault_core::error::CoreError;
use topicvault_core::principal::Principal;
use topicvault_core::tokens::hash_token;
use topicvault_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal resolved from the `Authorization: Bearer` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(principal_id = %auth.principal.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The role is not checked here; the topic service decides per operation.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
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

        let user = UserRepo::find_by_token_hash(&state.store, &hash_token(token.trim()))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;

        Ok(AuthUser {
            principal: user.to_principal(),
        })
    }
}
