//! Local Mirror Store: the on-device copy of catalog, subscription and profile rows.
//!
//! Rows are staged in memory by `insert`/`update`/`delete` and only reach disk on `save`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{Service, UserProfile, UserSubscription};

mod core_setup;
mod table_crud;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Table {
    Services,
    Subscriptions,
    Users,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Services, Table::Subscriptions, Table::Users];

    pub fn file_name(&self) -> &'static str {
        match self {
            Table::Services => "services.json",
            Table::Subscriptions => "subscriptions.json",
            Table::Users => "users.json",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Table::Services => "Service",
            Table::Subscriptions => "UserSubscription",
            Table::Users => "User",
        };
        f.write_str(name)
    }
}

/// An entity that can be mirrored. Each table is unique on `key`.
pub trait MirrorRecord: Clone + Serialize + DeserializeOwned + Send + 'static {
    const TABLE: Table;

    fn key(&self) -> &str;
}

impl MirrorRecord for Service {
    const TABLE: Table = Table::Services;

    fn key(&self) -> &str {
        &self.name
    }
}

impl MirrorRecord for UserSubscription {
    const TABLE: Table = Table::Subscriptions;

    fn key(&self) -> &str {
        &self.service_name
    }
}

impl MirrorRecord for UserProfile {
    const TABLE: Table = Table::Users;

    fn key(&self) -> &str {
        &self.email
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryOrder {
    /// Insertion order.
    #[default]
    Stored,
    /// Ascending by record key.
    ByKey,
}

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("{table} already has a row keyed {key:?}")]
    DuplicateKey { table: Table, key: String },

    #[error("{table} has no row keyed {key:?}")]
    Missing { table: Table, key: String },

    #[error("{table} row {key:?} is unreadable: {message}")]
    Corrupt {
        table: Table,
        key: String,
        message: String,
    },

    #[error("{0}")]
    Io(String),
}

pub trait MirrorStore: Send + Sync {
    fn query<T: MirrorRecord>(&self, order: QueryOrder) -> Result<Vec<T>, MirrorError>;

    fn insert<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError>;

    fn update<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError>;

    fn delete<T: MirrorRecord>(&self, key: &str) -> Result<(), MirrorError>;

    /// Removes every row of `T`'s table, returning how many were staged for deletion.
    fn delete_all<T: MirrorRecord>(&self) -> Result<usize, MirrorError>;

    /// Flushes staged changes.
    fn save(&self) -> Result<(), MirrorError>;

    fn find<T: MirrorRecord>(&self, key: &str) -> Result<Option<T>, MirrorError> {
        Ok(self
            .query::<T>(QueryOrder::Stored)?
            .into_iter()
            .find(|r| r.key() == key))
    }
}

/// File-backed [`MirrorStore`]: one JSON file per table under `<dir>/`.
pub struct JsonMirror {
    root: PathBuf,
    tables: Mutex<BTreeMap<Table, TableState>>,
}

#[derive(Default)]
struct TableState {
    rows: Vec<(String, serde_json::Value)>,
    dirty: bool,
}

pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
