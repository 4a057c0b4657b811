use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// The authenticated actor whose role gates every topic operation.
///
/// `role` is kept as the stored string; the strategy selector parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: DbId,
    pub name: String,
    pub role: String,
}

impl Principal {
    pub fn new(id: DbId, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }
}
