//! Topic storage binding and request DTOs.
//!
//! The record itself is defined in `topicvault_core::topic`, next to its
//! derivation rules.

use serde::Deserialize;
use topicvault_core::types::DbId;

pub use topicvault_core::topic::Topic;

use crate::store::Record;

impl Record for Topic {
    const COLLECTION: &'static str = "topics";

    fn id(&self) -> DbId {
        self.id
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new logical topic (version 1).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopic {
    pub name: String,
    pub content: String,
    pub parent_topic_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for deriving the next version of a topic. `name` is kept when absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopic {
    pub content: String,
    pub name: Option<String>,
}
