//! First-start seeding.

use topicvault_core::roles::ROLE_ADMIN;
use topicvault_core::tokens::hash_token;
use topicvault_db::models::user::{CreateUser, User};
use topicvault_db::repositories::UserRepo;
use topicvault_db::{Store, StoreError};

/// Create an `admin` principal for `token` when no principals exist yet.
///
/// Returns the created user, or `None` when no token was given or the store
/// already has principals.
pub async fn ensure_admin(store: &Store, token: Option<&str>) -> Result<Option<User>, StoreError> {
    let Some(token) = token else {
        return Ok(None);
    };
    if UserRepo::count(store).await? > 0 {
        return Ok(None);
    }

    let input = CreateUser {
        name: "admin".to_string(),
        role: ROLE_ADMIN.to_string(),
        token_hash: hash_token(token.trim()),
    };
    let user = UserRepo::create(store, &input).await?;
    tracing::info!(user_id = %user.id, "Bootstrap admin principal created");
    Ok(Some(user))
}
