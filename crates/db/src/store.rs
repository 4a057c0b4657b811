//! Whole-collection JSON files.
//!
//! A [`Collection`] owns one `<name>.json` file holding a JSON array of
//! records in insertion order. Mutations are serialized per collection by an
//! async mutex and land on disk through a temp-file rename, so a reader never
//! observes a half-written file. Nothing finer-grained is offered: callers
//! that read, compute, and write back across several calls get no isolation.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use topicvault_core::topic::Topic;
use topicvault_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::User;

/// A value that can live in a [`Collection`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// File stem of the collection, e.g. `"topics"`.
    const COLLECTION: &'static str;

    fn id(&self) -> DbId;
}

/// One collection file.
pub struct Collection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    /// Open the collection inside `dir`, creating an empty file if absent.
    pub async fn open(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(format!("{}.json", T::COLLECTION));
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        let collection = Self {
            path,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        };
        if !exists {
            collection.write_all(&[]).await?;
            tracing::debug!(path = %collection.path.display(), "Created empty collection");
        }
        Ok(collection)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::serde(&self.path, e))
    }

    async fn write_all(&self, records: &[T]) -> Result<(), StoreError> {
        let data =
            serde_json::to_vec_pretty(records).map_err(|e| StoreError::serde(&self.path, e))?;
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| StoreError::io(&temp_path, e))?;
        file.write_all(&data)
            .await
            .map_err(|e| StoreError::io(&temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::io(&temp_path, e))?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Every record, in storage order.
    pub async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.read_all().await
    }

    pub async fn find_by_id(&self, id: DbId) -> Result<Option<T>, StoreError> {
        Ok(self.read_all().await?.into_iter().find(|r| r.id() == id))
    }

    /// Records matching `predicate`, in storage order.
    pub async fn query<F>(&self, predicate: F) -> Result<Vec<T>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|r| predicate(r))
            .collect())
    }

    /// Append a record. Fails if its id is already present.
    pub async fn create(&self, record: T) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id: record.id(),
            });
        }
        records.push(record.clone());
        self.write_all(&records).await?;
        Ok(record)
    }

    /// Replace the record stored under `id`. Returns `None` if there is none.
    pub async fn update(&self, id: DbId, record: T) -> Result<Option<T>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        *slot = record.clone();
        self.write_all(&records).await?;
        Ok(Some(record))
    }

    /// Remove the record stored under `id`. Returns `true` if one was removed.
    pub async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }
}

/// Handle to every collection under one data directory.
///
/// Cheaply cloneable; clones share the same collections and write locks.
#[derive(Clone)]
pub struct Store {
    data_dir: Arc<PathBuf>,
    topics: Arc<Collection<Topic>>,
    users: Arc<Collection<User>>,
}

impl Store {
    /// Open the store rooted at `data_dir`, creating the directory and any
    /// missing collection files.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io(&dir, e))?;

        let topics = Collection::open(&dir).await?;
        let users = Collection::open(&dir).await?;

        Ok(Self {
            data_dir: Arc::new(dir),
            topics: Arc::new(topics),
            users: Arc::new(users),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn topics(&self) -> &Collection<Topic> {
        &self.topics
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }
}
