//! Flat-file persistence for the topic vault.
//!
//! Every collection is a single JSON array on disk. Reads load the whole
//! collection; writes rewrite it atomically. Repositories in
//! [`repositories`] are thin, collection-scoped wrappers over [`Store`].

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

use std::path::Path;

pub use error::StoreError;
pub use store::{Collection, Record, Store};

/// Open (creating if needed) the store rooted at `data_dir`.
pub async fn open_store(data_dir: impl AsRef<Path>) -> Result<Store, StoreError> {
    Store::open(data_dir).await
}

/// Verify every collection file can be read and parsed.
pub async fn health_check(store: &Store) -> Result<(), StoreError> {
    store.topics().find_all().await?;
    store.users().find_all().await?;
    Ok(())
}
