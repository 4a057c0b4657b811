//! Per-role access strategies and the strategy selector.
//!
//! Each [`AccessStrategy`] variant recognizes only its own role: a principal of
//! any other role is denied everything by that variant, including principals
//! of more privileged roles. There is no implied seniority between roles.
//!
//! Decisions depend on the principal's role alone. The topic argument is part
//! of the signature so topic-scoped rules can be added without touching call
//! sites.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::principal::Principal;
use crate::roles::Role;
use crate::topic::Topic;

/// An operation gated by the access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decision table per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStrategy {
    FullAccess,
    Contributor,
    ReadOnly,
}

impl AccessStrategy {
    /// The role this strategy recognizes.
    pub fn role(&self) -> Role {
        match self {
            AccessStrategy::FullAccess => Role::Admin,
            AccessStrategy::Contributor => Role::Contributor,
            AccessStrategy::ReadOnly => Role::Viewer,
        }
    }

    /// The action table for this strategy's own role.
    fn grants(&self, action: Action) -> bool {
        match (self, action) {
            (AccessStrategy::FullAccess, _) => true,
            (AccessStrategy::Contributor, Action::Delete) => false,
            (AccessStrategy::Contributor, _) => true,
            (AccessStrategy::ReadOnly, Action::Read) => true,
            (AccessStrategy::ReadOnly, _) => false,
        }
    }

    fn recognizes(&self, principal: &Principal) -> bool {
        principal.role == self.role().as_str()
    }

    /// Whether `principal` may perform `action`.
    ///
    /// `topic` is the target record, or the intended parent (if any) for
    /// creation.
    pub fn permits(&self, action: Action, principal: &Principal, _topic: Option<&Topic>) -> bool {
        self.recognizes(principal) && self.grants(action)
    }

    pub fn can_create(&self, principal: &Principal, parent: Option<&Topic>) -> bool {
        self.permits(Action::Create, principal, parent)
    }

    pub fn can_read(&self, principal: &Principal, topic: &Topic) -> bool {
        self.permits(Action::Read, principal, Some(topic))
    }

    pub fn can_update(&self, principal: &Principal, topic: &Topic) -> bool {
        self.permits(Action::Update, principal, Some(topic))
    }

    pub fn can_delete(&self, principal: &Principal, topic: &Topic) -> bool {
        self.permits(Action::Delete, principal, Some(topic))
    }
}

impl From<Role> for AccessStrategy {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => AccessStrategy::FullAccess,
            Role::Contributor => AccessStrategy::Contributor,
            Role::Viewer => AccessStrategy::ReadOnly,
        }
    }
}

/// Select the strategy for a principal's role.
///
/// Fails closed: an unrecognized role is a [`CoreError::Configuration`].
pub fn strategy_for(principal: &Principal) -> Result<AccessStrategy, CoreError> {
    Role::parse(&principal.role).map(AccessStrategy::from)
}
