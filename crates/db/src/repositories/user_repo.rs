//! Repository for the `users` collection.

use chrono::Utc;
use topicvault_core::types::{new_id, DbId};

use crate::error::StoreError;
use crate::models::user::{CreateUser, User};
use crate::store::Store;

/// Provides CRUD operations for principals.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new principal, returning the stored record.
    pub async fn create(store: &Store, input: &CreateUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let user = User {
            id: new_id(),
            name: input.name.clone(),
            role: input.role.clone(),
            token_hash: input.token_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        store.users().create(user).await
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Result<Option<User>, StoreError> {
        store.users().find_by_id(id).await
    }

    /// Resolve a principal from the SHA-256 digest of its bearer token.
    pub async fn find_by_token_hash(
        store: &Store,
        token_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(store
            .users()
            .query(|u| u.token_hash == token_hash)
            .await?
            .into_iter()
            .next())
    }

    pub async fn list(store: &Store) -> Result<Vec<User>, StoreError> {
        store.users().find_all().await
    }

    pub async fn count(store: &Store) -> Result<usize, StoreError> {
        Ok(store.users().find_all().await?.len())
    }
}
