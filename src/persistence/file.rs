//! JSON file-backed repository.
//!
//! The whole order sequence is rewritten on every mutation. Writes go to a
//! sibling `*.tmp` file which is then renamed over the log, so readers never
//! see a half-written file, and the in-memory sequence only changes once the
//! rename has succeeded.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::persistence::repository::OrderRepository;
use crate::persistence::types::Order;
use crate::types::error::{SimResult, StorageError};

/// Default log location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "orders.json";

/// Order log persisted as a pretty-printed JSON array.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    orders: RwLock<Vec<Order>>,
}

impl JsonFileRepository {
    /// Opens the log at `path`.
    ///
    /// A missing file yields an empty log; nothing is written until the first
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the file exists but is not a JSON
    /// order list, or `StorageError::Io` if it cannot be read.
    pub async fn load(path: impl Into<PathBuf>) -> SimResult<Self> {
        let path = path.into();
        let orders = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<Order>>(&bytes).map_err(|source| {
                StorageError::Malformed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StorageError::Io { path, source }.into()),
        };
        debug!(path = %path.display(), orders = orders.len(), "loaded order log");

        Ok(Self {
            path,
            orders: RwLock::new(orders),
        })
    }

    /// Returns the log path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, orders: &[Order]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(orders).map_err(StorageError::Serialize)?;
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, &json).await.map_err(io_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            // Best effort; the rename error is the one worth reporting.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(e));
        }

        debug!(path = %self.path.display(), orders = orders.len(), "persisted order log");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl OrderRepository for JsonFileRepository {
    async fn append(&self, order: &Order) -> SimResult<()> {
        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        if let Err(e) = self.persist(&orders).await {
            orders.pop();
            return Err(e.into());
        }
        Ok(())
    }

    async fn all(&self) -> SimResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn clear(&self) -> SimResult<()> {
        let mut orders = self.orders.write().await;
        self.persist(&[]).await?;
        orders.clear();
        Ok(())
    }

    async fn len(&self) -> SimResult<usize> {
        Ok(self.orders.read().await.len())
    }
}
