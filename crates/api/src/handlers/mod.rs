pub mod auth;
pub mod topics;
