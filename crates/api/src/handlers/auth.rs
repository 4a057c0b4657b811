//! Handlers about the calling principal.

use axum::Json;
use topicvault_core::principal::Principal;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /me
///
/// The principal resolved from the bearer token.
pub async fn me(auth: AuthUser) -> AppResult<Json<DataResponse<Principal>>> {
    Ok(Json(DataResponse {
        data: auth.principal,
    }))
}
