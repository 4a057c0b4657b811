//! The hierarchy and version engine.
//!
//! Every graph and version-chain algorithm over the topic collection lives
//! here. The engine is the only writer of topic records and never consults
//! permissions.
//!
//! Parent links point at a specific version record. A new version inherits
//! the parent link of the chain it extends, so children stay attached to the
//! exact record they were created under.
//!
//! Existence failures come back as `None`/`false`/empty. The one reported
//! domain error is deleting a topic that still has children
//! ([`CoreError::Conflict`]).

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::Utc;
use topicvault_core::error::CoreError;
use topicvault_core::topic::{latest_version, validate_content, validate_name, Topic};
use topicvault_core::tree::TopicTree;
use topicvault_core::types::{new_id, DbId};
use topicvault_db::models::topic::CreateTopic;
use topicvault_db::repositories::TopicRepo;
use topicvault_db::Store;

use crate::error::ServiceResult;

/// Graph and version operations over the topic store.
#[derive(Clone)]
pub struct TopicHierarchy {
    store: Store,
}

impl TopicHierarchy {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Single-record operations
    // -----------------------------------------------------------------------

    /// Create version 1 of a new logical topic.
    ///
    /// Fails with [`CoreError::NotFound`] when `parent_topic_id` does not
    /// resolve to a stored record.
    pub async fn create_topic(&self, input: &CreateTopic) -> ServiceResult<Topic> {
        validate_name(&input.name)?;
        validate_content(&input.content)?;

        if let Some(parent_id) = input.parent_topic_id {
            if TopicRepo::find_by_id(&self.store, parent_id).await?.is_none() {
                return Err(CoreError::NotFound {
                    entity: "Topic",
                    id: parent_id,
                }
                .into());
            }
        }

        let topic = Topic::new(
            new_id(),
            &input.name,
            &input.content,
            input.parent_topic_id,
            Utc::now(),
        );
        let topic = TopicRepo::create(&self.store, topic).await?;

        tracing::info!(
            topic_id = %topic.id,
            parent_topic_id = ?topic.parent_topic_id,
            "Topic created"
        );
        Ok(topic)
    }

    pub async fn get_topic(&self, id: DbId) -> ServiceResult<Option<Topic>> {
        Ok(TopicRepo::find_by_id(&self.store, id).await?)
    }

    /// Persist the next version of the topic that `id` belongs to.
    ///
    /// The new record extends the chain's latest version, whichever member
    /// `id` names, so the chain never branches. Returns `None` when `id` is
    /// unknown.
    pub async fn update_topic(
        &self,
        id: DbId,
        content: &str,
        name: Option<&str>,
    ) -> ServiceResult<Option<Topic>> {
        let Some(target) = TopicRepo::find_by_id(&self.store, id).await? else {
            return Ok(None);
        };

        validate_content(content)?;
        if let Some(name) = name {
            validate_name(name)?;
        }

        let chain = self.get_all_topic_versions(target.root_topic_id).await?;
        let latest = latest_version(&chain).unwrap_or(&target);
        let next = latest.next_version(new_id(), content, name, Utc::now());
        let next = TopicRepo::create(&self.store, next).await?;

        tracing::info!(
            topic_id = %next.id,
            root_topic_id = %next.root_topic_id,
            version = next.version,
            "Topic version created"
        );
        Ok(Some(next))
    }

    /// Remove exactly the record `id`.
    ///
    /// Returns `false` when `id` is unknown. Fails with
    /// [`CoreError::Conflict`] while any record names it as parent; the store
    /// is left untouched in that case.
    pub async fn delete_topic(&self, id: DbId) -> ServiceResult<bool> {
        if TopicRepo::find_by_id(&self.store, id).await?.is_none() {
            return Ok(false);
        }

        let children = self.get_child_topics(id).await?;
        if !children.is_empty() {
            return Err(CoreError::Conflict(format!(
                "Topic {id} has {} child topic(s) and cannot be deleted",
                children.len()
            ))
            .into());
        }

        let deleted = TopicRepo::delete(&self.store, id).await?;
        if deleted {
            tracing::info!(topic_id = %id, "Topic deleted");
        }
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    pub async fn get_all_topics(&self) -> ServiceResult<Vec<Topic>> {
        Ok(TopicRepo::list(&self.store).await?)
    }

    /// Records with no parent.
    pub async fn get_root_topics(&self) -> ServiceResult<Vec<Topic>> {
        Ok(TopicRepo::query(&self.store, Topic::is_root_level).await?)
    }

    /// Direct children of `parent_id`, in storage order.
    pub async fn get_child_topics(&self, parent_id: DbId) -> ServiceResult<Vec<Topic>> {
        Ok(TopicRepo::query(&self.store, |t| t.parent_topic_id == Some(parent_id)).await?)
    }

    // -----------------------------------------------------------------------
    // Version chains
    // -----------------------------------------------------------------------

    /// Every version of the logical topic `root_id`, ascending by version.
    pub async fn get_all_topic_versions(&self, root_id: DbId) -> ServiceResult<Vec<Topic>> {
        let mut versions =
            TopicRepo::query(&self.store, |t| t.root_topic_id == root_id).await?;
        versions.sort_by_key(|t| t.version);
        Ok(versions)
    }

    pub async fn get_topic_version(
        &self,
        root_id: DbId,
        version: i32,
    ) -> ServiceResult<Option<Topic>> {
        Ok(
            TopicRepo::query(&self.store, |t| t.root_topic_id == root_id && t.version == version)
                .await?
                .into_iter()
                .next(),
        )
    }

    /// The chain member with the highest version number.
    pub async fn get_latest_topic_version(&self, root_id: DbId) -> ServiceResult<Option<Topic>> {
        let versions = TopicRepo::query(&self.store, |t| t.root_topic_id == root_id).await?;
        Ok(latest_version(&versions).cloned())
    }

    // -----------------------------------------------------------------------
    // Graph walks
    // -----------------------------------------------------------------------

    /// The topic `root_id` with every transitive descendant nested under it.
    pub async fn get_topic_tree(&self, root_id: DbId) -> ServiceResult<Option<TopicTree>> {
        let Some(root) = TopicRepo::find_by_id(&self.store, root_id).await? else {
            return Ok(None);
        };

        let descendants = self.collect_descendants(root.id).await?;
        let tree = TopicTree::assemble(root, descendants);
        tracing::debug!(
            root_id = %root_id,
            node_count = tree.node_count(),
            depth = tree.depth(),
            "Assembled topic tree"
        );
        Ok(Some(tree))
    }

    /// Breadth-first expansion through child lookups. Each record appears at
    /// most once even if the stored links are malformed.
    async fn collect_descendants(&self, root_id: DbId) -> ServiceResult<Vec<Topic>> {
        let mut seen = HashSet::from([root_id]);
        let mut queue = VecDeque::from([root_id]);
        let mut descendants = Vec::new();

        while let Some(current) = queue.pop_front() {
            for child in self.get_child_topics(current).await? {
                if seen.insert(child.id) {
                    queue.push_back(child.id);
                    descendants.push(child);
                }
            }
        }
        Ok(descendants)
    }

    /// A shortest chain of parent/child links from `start_id` to `end_id`,
    /// both inclusive.
    ///
    /// Links are walked in both directions. Returns `None` when either id is
    /// unknown or the two topics are not connected. Among equally short paths
    /// the one found first wins: a node's parent is explored before its
    /// children, and children in storage order.
    pub async fn find_path(
        &self,
        start_id: DbId,
        end_id: DbId,
    ) -> ServiceResult<Option<Vec<Topic>>> {
        let Some(start) = TopicRepo::find_by_id(&self.store, start_id).await? else {
            return Ok(None);
        };
        if TopicRepo::find_by_id(&self.store, end_id).await?.is_none() {
            return Ok(None);
        }
        if start_id == end_id {
            return Ok(Some(vec![start]));
        }

        let mut nodes: HashMap<DbId, Topic> = HashMap::new();
        let mut predecessors: HashMap<DbId, DbId> = HashMap::new();
        let mut visited = HashSet::from([start_id]);
        let mut queue = VecDeque::from([start.clone()]);
        nodes.insert(start_id, start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(&current).await? {
                if !visited.insert(neighbor.id) {
                    continue;
                }
                predecessors.insert(neighbor.id, current.id);
                nodes.insert(neighbor.id, neighbor.clone());

                if neighbor.id == end_id {
                    let path = trace_back(end_id, &predecessors, nodes);
                    tracing::debug!(
                        start_id = %start_id,
                        end_id = %end_id,
                        length = path.len(),
                        explored = visited.len(),
                        "Found topic path"
                    );
                    return Ok(Some(path));
                }
                queue.push_back(neighbor);
            }
        }

        tracing::debug!(
            start_id = %start_id,
            end_id = %end_id,
            explored = visited.len(),
            "No topic path"
        );
        Ok(None)
    }

    /// Parent first (when it still exists), then children in storage order.
    async fn neighbors(&self, topic: &Topic) -> ServiceResult<Vec<Topic>> {
        let mut out = Vec::new();
        if let Some(parent_id) = topic.parent_topic_id {
            if let Some(parent) = TopicRepo::find_by_id(&self.store, parent_id).await? {
                out.push(parent);
            }
        }
        out.extend(self.get_child_topics(topic.id).await?);
        Ok(out)
    }
}

/// Rebuild the start-to-end sequence from the predecessor map.
fn trace_back(
    end_id: DbId,
    predecessors: &HashMap<DbId, DbId>,
    mut nodes: HashMap<DbId, Topic>,
) -> Vec<Topic> {
    let mut ids = vec![end_id];
    let mut cursor = end_id;
    while let Some(prev) = predecessors.get(&cursor) {
        ids.push(*prev);
        cursor = *prev;
    }
    ids.reverse();
    ids.into_iter().filter_map(|id| nodes.remove(&id)).collect()
}
