//! Topic version records, validation, and version derivation.
//!
//! A stored [`Topic`] is one immutable snapshot. Updating a topic never edits a
//! record in place: [`Topic::next_version`] derives a new record that links back
//! to its predecessor and shares the same `root_topic_id`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a topic name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of topic content, in characters.
pub const MAX_CONTENT_LENGTH: usize = 100_000;

/// Version number assigned to every newly created logical topic.
pub const INITIAL_VERSION: i32 = 1;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One version of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: DbId,
    pub name: String,
    pub content: String,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// The parent version record. `None` for root-level topics.
    pub parent_topic_id: Option<DbId>,
    /// The record this one supersedes. `None` only for version 1.
    pub previous_version_id: Option<DbId>,
    /// Identity of the logical topic, shared by every version. Equal to `id`
    /// for version 1.
    pub root_topic_id: DbId,
}

impl Topic {
    /// Build version 1 of a new logical topic.
    pub fn new(
        id: DbId,
        name: &str,
        content: &str,
        parent_topic_id: Option<DbId>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            content: content.to_string(),
            version: INITIAL_VERSION,
            created_at: now,
            updated_at: now,
            parent_topic_id,
            previous_version_id: None,
            root_topic_id: id,
        }
    }

    /// Derive the record that follows `self` in its version chain.
    ///
    /// The name is carried over unless `name` is given. The parent link and
    /// root identity are always carried over, and `created_at` is preserved
    /// from the first version.
    pub fn next_version(
        &self,
        id: DbId,
        content: &str,
        name: Option<&str>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.unwrap_or(&self.name).to_string(),
            content: content.to_string(),
            version: self.version + 1,
            created_at: self.created_at,
            updated_at: now,
            parent_topic_id: self.parent_topic_id,
            previous_version_id: Some(self.id),
            root_topic_id: self.root_topic_id,
        }
    }

    pub fn is_root_level(&self) -> bool {
        self.parent_topic_id.is_none()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a topic name (non-empty after trimming, <= 200 chars).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate topic content (non-empty after trimming, <= 100 000 chars).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content must not be empty".into()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Pick the record with the highest version number.
pub fn latest_version<'a, I>(versions: I) -> Option<&'a Topic>
where
    I: IntoIterator<Item = &'a Topic>,
{
    versions.into_iter().max_by_key(|t| t.version)
}
