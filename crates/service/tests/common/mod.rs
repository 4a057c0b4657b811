#![allow(dead_code)]

use tempfile::TempDir;
use topicvault_core::principal::Principal;
use topicvault_core::topic::Topic;
use topicvault_core::tree::TopicTree;
use topicvault_core::types::{new_id, DbId};
use topicvault_db::models::topic::CreateTopic;
use topicvault_db::open_store;
use topicvault_service::{SecureTopicService, TopicHierarchy};

/// Open an empty store in a temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn fresh_hierarchy() -> (TempDir, TopicHierarchy) {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(dir.path()).await.expect("store should open");
    (dir, TopicHierarchy::new(store))
}

pub async fn fresh_service() -> (TempDir, SecureTopicService) {
    let (dir, hierarchy) = fresh_hierarchy().await;
    (dir, SecureTopicService::new(hierarchy))
}

pub fn new_topic(name: &str, parent: Option<DbId>) -> CreateTopic {
    CreateTopic {
        name: name.to_string(),
        content: format!("{name} content"),
        parent_topic_id: parent,
    }
}

/// Create a topic directly through the engine, bypassing access checks.
pub async fn seed(hierarchy: &TopicHierarchy, name: &str, parent: Option<&Topic>) -> Topic {
    hierarchy
        .create_topic(&new_topic(name, parent.map(|p| p.id)))
        .await
        .expect("seed topic should be created")
}

pub fn principal(role: &str) -> Principal {
    Principal::new(new_id(), format!("{role}-user"), role)
}

pub fn admin() -> Principal {
    principal("admin")
}

pub fn contributor() -> Principal {
    principal("contributor")
}

pub fn viewer() -> Principal {
    principal("viewer")
}

pub fn ids(topics: &[Topic]) -> Vec<DbId> {
    topics.iter().map(|t| t.id).collect()
}

/// Every id in `tree`, root first, then each subtree in sibling order.
pub fn tree_ids(tree: &TopicTree) -> Vec<DbId> {
    let mut out = vec![tree.topic.id];
    for child in &tree.children {
        out.extend(tree_ids(child));
    }
    out
}
