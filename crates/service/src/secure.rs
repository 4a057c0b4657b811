//! Role-gated facade over [`TopicHierarchy`].
//!
//! - Mutations check permission before delegating; a denial performs no write.
//! - Single-record reads fetch first, then check. An absent record is `None`,
//!   never a denial.
//! - Multi-record reads drop whatever the principal may not read, silently.
//!
//! Every call selects the principal's strategy up front, so an unrecognized
//! role fails with [`CoreError::Configuration`] before any work is done.

use topicvault_core::access::{strategy_for, AccessStrategy, Action};
use topicvault_core::error::CoreError;
use topicvault_core::principal::Principal;
use topicvault_core::topic::Topic;
use topicvault_core::tree::TopicTree;
use topicvault_core::types::DbId;
use topicvault_db::models::topic::CreateTopic;

use crate::error::ServiceResult;
use crate::hierarchy::TopicHierarchy;

/// Topic operations on behalf of a principal.
#[derive(Clone)]
pub struct SecureTopicService {
    hierarchy: TopicHierarchy,
}

impl SecureTopicService {
    pub fn new(hierarchy: TopicHierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> &TopicHierarchy {
        &self.hierarchy
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a topic. The check depends on the role alone, so it runs even
    /// when the intended parent does not exist.
    pub async fn create_topic(
        &self,
        principal: &Principal,
        input: &CreateTopic,
    ) -> ServiceResult<Topic> {
        let strategy = select(principal)?;
        let parent = match input.parent_topic_id {
            Some(parent_id) => self.hierarchy.get_topic(parent_id).await?,
            None => None,
        };
        authorize(strategy, principal, Action::Create, parent.as_ref())?;
        self.hierarchy.create_topic(input).await
    }

    pub async fn update_topic(
        &self,
        principal: &Principal,
        id: DbId,
        content: &str,
        name: Option<&str>,
    ) -> ServiceResult<Option<Topic>> {
        let strategy = select(principal)?;
        let Some(target) = self.hierarchy.get_topic(id).await? else {
            return Ok(None);
        };
        authorize(strategy, principal, Action::Update, Some(&target))?;
        self.hierarchy.update_topic(id, content, name).await
    }

    pub async fn delete_topic(&self, principal: &Principal, id: DbId) -> ServiceResult<bool> {
        let strategy = select(principal)?;
        let Some(target) = self.hierarchy.get_topic(id).await? else {
            return Ok(false);
        };
        authorize(strategy, principal, Action::Delete, Some(&target))?;
        self.hierarchy.delete_topic(id).await
    }

    // -----------------------------------------------------------------------
    // Single-record reads
    // -----------------------------------------------------------------------

    pub async fn get_topic(&self, principal: &Principal, id: DbId) -> ServiceResult<Option<Topic>> {
        let strategy = select(principal)?;
        let topic = self.hierarchy.get_topic(id).await?;
        ensure_readable(strategy, principal, topic)
    }

    pub async fn get_topic_version(
        &self,
        principal: &Principal,
        root_id: DbId,
        version: i32,
    ) -> ServiceResult<Option<Topic>> {
        let strategy = select(principal)?;
        let topic = self.hierarchy.get_topic_version(root_id, version).await?;
        ensure_readable(strategy, principal, topic)
    }

    pub async fn get_latest_topic_version(
        &self,
        principal: &Principal,
        root_id: DbId,
    ) -> ServiceResult<Option<Topic>> {
        let strategy = select(principal)?;
        let topic = self.hierarchy.get_latest_topic_version(root_id).await?;
        ensure_readable(strategy, principal, topic)
    }

    // -----------------------------------------------------------------------
    // Multi-record reads
    // -----------------------------------------------------------------------

    pub async fn get_all_topics(&self, principal: &Principal) -> ServiceResult<Vec<Topic>> {
        let strategy = select(principal)?;
        let topics = self.hierarchy.get_all_topics().await?;
        Ok(readable(strategy, principal, topics))
    }

    pub async fn get_root_topics(&self, principal: &Principal) -> ServiceResult<Vec<Topic>> {
        let strategy = select(principal)?;
        let topics = self.hierarchy.get_root_topics().await?;
        Ok(readable(strategy, principal, topics))
    }

    /// Children of `parent_id`. The parent itself must be readable; the check
    /// happens before any child is fetched. An absent parent yields an empty
    /// list.
    pub async fn get_child_topics(
        &self,
        principal: &Principal,
        parent_id: DbId,
    ) -> ServiceResult<Vec<Topic>> {
        let strategy = select(principal)?;
        let Some(parent) = self.hierarchy.get_topic(parent_id).await? else {
            return Ok(Vec::new());
        };
        authorize(strategy, principal, Action::Read, Some(&parent))?;

        let children = self.hierarchy.get_child_topics(parent_id).await?;
        Ok(readable(strategy, principal, children))
    }

    pub async fn get_all_topic_versions(
        &self,
        principal: &Principal,
        root_id: DbId,
    ) -> ServiceResult<Vec<Topic>> {
        let strategy = select(principal)?;
        let versions = self.hierarchy.get_all_topic_versions(root_id).await?;
        Ok(readable(strategy, principal, versions))
    }

    /// The tree under `root_id`, pruned at every topic the principal may not
    /// read. Descendants of a pruned topic are dropped with it.
    pub async fn get_topic_tree(
        &self,
        principal: &Principal,
        root_id: DbId,
    ) -> ServiceResult<Option<TopicTree>> {
        let strategy = select(principal)?;
        let Some(tree) = self.hierarchy.get_topic_tree(root_id).await? else {
            return Ok(None);
        };
        authorize(strategy, principal, Action::Read, Some(&tree.topic))?;

        Ok(tree.prune(&|t: &Topic| strategy.can_read(principal, t)))
    }

    /// A shortest path between two readable topics, with unreadable
    /// intermediate topics removed.
    ///
    /// The filtered path is not re-checked for connectivity, so it may skip
    /// over hidden links.
    pub async fn find_path(
        &self,
        principal: &Principal,
        start_id: DbId,
        end_id: DbId,
    ) -> ServiceResult<Option<Vec<Topic>>> {
        let strategy = select(principal)?;
        let Some(start) = self.hierarchy.get_topic(start_id).await? else {
            return Ok(None);
        };
        let Some(end) = self.hierarchy.get_topic(end_id).await? else {
            return Ok(None);
        };
        authorize(strategy, principal, Action::Read, Some(&start))?;
        authorize(strategy, principal, Action::Read, Some(&end))?;

        let path = self.hierarchy.find_path(start_id, end_id).await?;
        Ok(path.map(|p| readable(strategy, principal, p)))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn select(principal: &Principal) -> ServiceResult<AccessStrategy> {
    strategy_for(principal).map_err(|e| {
        tracing::error!(
            principal_id = %principal.id,
            role = %principal.role,
            "Principal carries an unrecognized role"
        );
        e.into()
    })
}

fn authorize(
    strategy: AccessStrategy,
    principal: &Principal,
    action: Action,
    topic: Option<&Topic>,
) -> ServiceResult<()> {
    if strategy.permits(action, principal, topic) {
        return Ok(());
    }

    tracing::warn!(
        principal_id = %principal.id,
        role = %principal.role,
        action = %action,
        topic_id = ?topic.map(|t| t.id),
        "Permission denied"
    );
    Err(CoreError::PermissionDenied {
        action,
        role: principal.role.clone(),
    }
    .into())
}

fn ensure_readable(
    strategy: AccessStrategy,
    principal: &Principal,
    topic: Option<Topic>,
) -> ServiceResult<Option<Topic>> {
    if let Some(topic) = &topic {
        authorize(strategy, principal, Action::Read, Some(topic))?;
    }
    Ok(topic)
}

fn readable(strategy: AccessStrategy, principal: &Principal, topics: Vec<Topic>) -> Vec<Topic> {
    topics
        .into_iter()
        .filter(|t| strategy.can_read(principal, t))
        .collect()
}
