//! Repository for the `topics` collection.
//!
//! A pass-through to the store; graph and version logic lives in the service
//! layer.

use topicvault_core::types::DbId;

use crate::error::StoreError;
use crate::models::topic::Topic;
use crate::store::Store;

/// Provides record-level operations on topics.
pub struct TopicRepo;

impl TopicRepo {
    pub async fn find_by_id(store: &Store, id: DbId) -> Result<Option<Topic>, StoreError> {
        store.topics().find_by_id(id).await
    }

    /// Every stored version of every topic, in storage order.
    pub async fn list(store: &Store) -> Result<Vec<Topic>, StoreError> {
        store.topics().find_all().await
    }

    /// Persist a new record. Fails if its id is already stored.
    pub async fn create(store: &Store, topic: Topic) -> Result<Topic, StoreError> {
        store.topics().create(topic).await
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        topic: Topic,
    ) -> Result<Option<Topic>, StoreError> {
        store.topics().update(id, topic).await
    }

    /// Delete a single record. Returns `true` if it existed.
    pub async fn delete(store: &Store, id: DbId) -> Result<bool, StoreError> {
        store.topics().delete(id).await
    }

    pub async fn query<F>(store: &Store, predicate: F) -> Result<Vec<Topic>, StoreError>
    where
        F: Fn(&Topic) -> bool,
    {
        store.topics().query(predicate).await
    }
}
