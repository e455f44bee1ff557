//! Test doubles wrapped around the in-process gateway and the JSON mirror.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use subtrack::model::{AccountId, UserSubscription};
use subtrack::remote::{
    Document, FieldPath, FieldUpdate, MemoryGateway, RemoteError, RemoteGateway,
};
use subtrack::session::SessionState;
use subtrack::store::{JsonMirror, MirrorError, MirrorRecord, MirrorStore, QueryOrder};
use subtrack::sync::SyncCoordinator;

pub const ACCOUNT: &str = "ada@example.com";

pub fn account() -> AccountId {
    AccountId::parse(ACCOUNT).expect("valid account")
}

pub fn sub(service: &str, plan: &str, price: f64, persons: u32) -> UserSubscription {
    UserSubscription {
        service_name: service.to_string(),
        plan_name: plan.to_string(),
        plan_price: price,
        person_count: persons,
    }
}

/// Builds a `Document` from a `json!` object literal.
pub fn doc(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub fn seed_catalog(gateway: &MemoryGateway) {
    let seed = super::catalog_seed();
    for (key, fields) in seed["Services"].as_object().expect("services").clone() {
        gateway.seed("Services", &key, doc(fields));
    }
}

pub struct Harness<R = MemoryGateway, M = JsonMirror> {
    pub sync: SyncCoordinator<R, M>,
    pub _dir: tempfile::TempDir,
}

/// A coordinator over `gateway` and a fresh JSON mirror.
pub fn harness(gateway: MemoryGateway) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let mirror = JsonMirror::open(&dir.path().join("mirror")).expect("open mirror");
    Harness {
        sync: SyncCoordinator::new(gateway, mirror, account(), SessionState::default()),
        _dir: dir,
    }
}

/// Mirror whose writes can be switched to fail; reads always pass through.
pub struct FlakyMirror {
    inner: JsonMirror,
    fail_writes: AtomicBool,
}

impl FlakyMirror {
    pub fn new(inner: JsonMirror) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), MirrorError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MirrorError::Io("disk full".to_string()));
        }
        Ok(())
    }
}

impl MirrorStore for FlakyMirror {
    fn query<T: MirrorRecord>(&self, order: QueryOrder) -> Result<Vec<T>, MirrorError> {
        self.inner.query(order)
    }

    fn insert<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError> {
        self.check()?;
        self.inner.insert(record)
    }

    fn update<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError> {
        self.check()?;
        self.inner.update(record)
    }

    fn delete<T: MirrorRecord>(&self, key: &str) -> Result<(), MirrorError> {
        self.check()?;
        self.inner.delete::<T>(key)
    }

    fn delete_all<T: MirrorRecord>(&self) -> Result<usize, MirrorError> {
        self.check()?;
        self.inner.delete_all::<T>()
    }

    fn save(&self) -> Result<(), MirrorError> {
        self.check()?;
        self.inner.save()
    }
}

/// Gateway that parks the first `get_document` call until [`GatedGateway::release`].
#[derive(Clone)]
pub struct GatedGateway {
    inner: MemoryGateway,
    hold_first: Arc<AtomicBool>,
    park_after_read: bool,
    entered: Arc<Notify>,
    released: Arc<Notify>,
}

impl GatedGateway {
    /// Parks before the document is read.
    pub fn new(inner: MemoryGateway) -> Self {
        Self {
            inner,
            hold_first: Arc::new(AtomicBool::new(true)),
            park_after_read: false,
            entered: Arc::new(Notify::new()),
            released: Arc::new(Notify::new()),
        }
    }

    /// Reads the document first, then parks while holding the old copy.
    pub fn after_read(inner: MemoryGateway) -> Self {
        Self {
            park_after_read: true,
            ..Self::new(inner)
        }
    }

    /// Resolves once the held call has reached the gateway.
    pub async fn held(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[async_trait]
impl RemoteGateway for GatedGateway {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Document>, RemoteError> {
        if !self.hold_first.swap(false, Ordering::SeqCst) {
            return self.inner.get_document(collection, key).await;
        }
        if self.park_after_read {
            let read = self.inner.get_document(collection, key).await;
            self.entered.notify_one();
            self.released.notified().await;
            return read;
        }
        self.entered.notify_one();
        self.released.notified().await;
        self.inner.get_document(collection, key).await
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Document,
        merge: bool,
    ) -> Result<(), RemoteError> {
        self.inner
            .set_document(collection, key, document, merge)
            .await
    }

    async fn update_field(
        &self,
        collection: &str,
        key: &str,
        path: &FieldPath,
        update: FieldUpdate,
    ) -> Result<(), RemoteError> {
        self.inner.update_field(collection, key, path, update).await
    }

    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, RemoteError> {
        self.inner.list_documents(collection).await
    }
}
