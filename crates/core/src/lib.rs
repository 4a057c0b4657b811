//! Domain layer for the topic vault.
//!
//! Holds the topic record model, the per-role access strategies, and the
//! shared error and id types. This crate has no internal dependencies so the
//! store, service, and HTTP layers can all build on it.

pub mod access;
pub mod error;
pub mod hashing;
pub mod principal;
pub mod roles;
pub mod tokens;
pub mod topic;
pub mod tree;
pub mod types;
