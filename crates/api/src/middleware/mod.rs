//! Request extractors shared by handlers.
//!
//! - [`auth`] -- bearer-token principal resolution.

pub mod auth;
