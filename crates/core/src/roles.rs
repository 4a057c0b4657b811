//! Well-known role names and the closed [`Role`] type.
//!
//! Roles are stored as plain strings on principal records; [`Role::parse`] is
//! the only place a stored string becomes a role.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CONTRIBUTOR, ROLE_VIEWER];

/// The three mutually exclusive principal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: create, read, update, and delete.
    Admin,
    /// Create, read, and update. Never delete.
    Contributor,
    /// Read only.
    Viewer,
}

impl Role {
    /// Parse a stored role name.
    ///
    /// An unknown name is a [`CoreError::Configuration`]: principals are only
    /// ever written with one of [`VALID_ROLES`].
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_CONTRIBUTOR => Ok(Role::Contributor),
            ROLE_VIEWER => Ok(Role::Viewer),
            other => Err(CoreError::Configuration(format!(
                "Unrecognized role '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Contributor => ROLE_CONTRIBUTOR,
            Role::Viewer => ROLE_VIEWER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
