//! Nested topic trees.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::topic::Topic;
use crate::types::DbId;

/// A topic together with all of its transitive children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTree {
    #[serde(flatten)]
    pub topic: Topic,
    pub children: Vec<TopicTree>,
}

impl TopicTree {
    pub fn leaf(topic: Topic) -> Self {
        Self {
            topic,
            children: Vec::new(),
        }
    }

    /// Nest a flat set of descendants under `root` by their parent links.
    ///
    /// Order among siblings follows the order of `descendants`. Records whose
    /// parent is not reachable from `root` are dropped, as is any record
    /// carrying the root's own id.
    pub fn assemble(root: Topic, descendants: Vec<Topic>) -> Self {
        let mut by_parent: HashMap<DbId, Vec<Topic>> = HashMap::new();
        for topic in descendants {
            if topic.id == root.id {
                continue;
            }
            if let Some(parent_id) = topic.parent_topic_id {
                by_parent.entry(parent_id).or_default().push(topic);
            }
        }
        Self::attach(root, &mut by_parent)
    }

    // Each parent's bucket is taken exactly once, so a malformed cycle in the
    // input cannot recurse forever.
    fn attach(topic: Topic, by_parent: &mut HashMap<DbId, Vec<Topic>>) -> Self {
        let children = by_parent
            .remove(&topic.id)
            .unwrap_or_default()
            .into_iter()
            .map(|child| Self::attach(child, by_parent))
            .collect();
        Self { topic, children }
    }

    /// Drop every subtree rooted at a topic that fails `keep`.
    ///
    /// A rejected node takes its whole subtree with it; descendants are never
    /// re-attached higher up. Returns `None` when the root itself is rejected.
    pub fn prune<F>(self, keep: &F) -> Option<Self>
    where
        F: Fn(&Topic) -> bool,
    {
        if !keep(&self.topic) {
            return None;
        }
        let children = self
            .children
            .into_iter()
            .filter_map(|child| child.prune(keep))
            .collect();
        Some(Self {
            topic: self.topic,
            children,
        })
    }

    /// Total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TopicTree::node_count)
            .sum::<usize>()
    }

    /// Number of levels, counting the root as 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TopicTree::depth).max().unwrap_or(0)
    }
}
