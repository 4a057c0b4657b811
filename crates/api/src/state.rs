use topicvault_db::Store;
use topicvault_service::{SecureTopicService, TopicHierarchy};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Flat-file record store.
    pub store: Store,
    /// Role-gated topic operations.
    pub topics: SecureTopicService,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        let topics = SecureTopicService::new(TopicHierarchy::new(store.clone()));
        Self { store, topics }
    }
}
