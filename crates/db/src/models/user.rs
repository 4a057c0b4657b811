//! Principal records.

use serde::{Deserialize, Serialize};
use topicvault_core::principal::Principal;
use topicvault_core::types::{DbId, Timestamp};

use crate::store::Record;

/// A stored principal.
///
/// Carries the token digest -- NEVER serialize this to API responses directly.
/// Use [`Principal`] for external-facing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub token_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn to_principal(&self) -> Principal {
        Principal::new(self.id, self.name.clone(), self.role.clone())
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a new principal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub role: String,
    pub token_hash: String,
}
