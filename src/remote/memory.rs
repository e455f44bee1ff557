use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::{
    Document, FieldPath, FieldUpdate, RemoteError, RemoteGateway, apply_field_update,
    merge_documents,
};

/// Per-method call counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get: usize,
    pub set: usize,
    pub update: usize,
    pub list: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.get + self.set + self.update + self.list
    }
}

#[derive(Default)]
struct MemoryState {
    collections: BTreeMap<String, BTreeMap<String, Document>>,
    calls: CallCounts,
    fail_next: usize,
    offline: bool,
}

/// In-process [`RemoteGateway`]. Clones share the same documents and counters.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stores a document without counting a call.
    pub fn seed(&self, collection: &str, key: &str, document: Document) {
        self.state()
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
    }

    /// Reads a document without counting a call.
    pub fn document(&self, collection: &str, key: &str) -> Option<Document> {
        self.state()
            .collections
            .get(collection)
            .and_then(|c| c.get(key))
            .cloned()
    }

    pub fn calls(&self) -> CallCounts {
        self.state().calls
    }

    pub fn reset_calls(&self) {
        self.state().calls = CallCounts::default();
    }

    /// Makes the next `n` calls fail with a transport error.
    pub fn fail_next(&self, n: usize) {
        self.state().fail_next = n;
    }

    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }
}

impl MemoryState {
    fn check_available(&mut self, label: &str) -> Result<(), RemoteError> {
        if self.offline {
            return Err(RemoteError::Transport(format!("{}: remote unavailable", label)));
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(RemoteError::Transport(format!("{}: injected failure", label)));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteGateway for MemoryGateway {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, RemoteError> {
        let mut st = self.state();
        st.calls.get += 1;
        st.check_available("get document")?;
        Ok(st
            .collections
            .get(collection)
            .and_then(|c| c.get(key))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Document,
        merge: bool,
    ) -> Result<(), RemoteError> {
        let mut st = self.state();
        st.calls.set += 1;
        st.check_available("set document")?;
        let docs = st.collections.entry(collection.to_string()).or_default();
        match docs.get_mut(key) {
            Some(existing) if merge => merge_documents(existing, document),
            _ => {
                docs.insert(key.to_string(), document);
            }
        }
        Ok(())
    }

    async fn update_field(
        &self,
        collection: &str,
        key: &str,
        path: &FieldPath,
        update: FieldUpdate,
    ) -> Result<(), RemoteError> {
        let mut st = self.state();
        st.calls.update += 1;
        st.check_available("update field")?;
        let Some(doc) = st
            .collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(key))
        else {
            return Err(RemoteError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        };
        apply_field_update(doc, path, update).map_err(|e| RemoteError::Status {
            operation: "update field".to_string(),
            status: 400,
            message: e.to_string(),
        })
    }

    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, RemoteError> {
        let mut st = self.state();
        st.calls.list += 1;
        st.check_available("list documents")?;
        Ok(st
            .collections
            .get(collection)
            .map(|c| c.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}
