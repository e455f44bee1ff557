//! Sync Coordinator: picks remote or mirror per collection and reconciles the two.
//!
//! Every mutation goes to the remote first and is replayed on the mirror only after the
//! remote confirmed it. Mirror failures after a confirmed remote write are logged, not
//! returned: the remote stays authoritative.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::model::{AccountId, Plan, Service, UserProfile, UserSubscription, ValidationError};
use crate::remote::{
    Document, FIELD_SUBSCRIPTIONS, FieldPath, FieldUpdate, ParseError, RemoteError,
    RemoteGateway, SERVICES, USERS, UserDocument, encode_account, encode_subscription,
    merge_documents, parse_plans, parse_service_document, parse_user_document,
};
use crate::session::{CollectionState, SessionState};
use crate::store::{MirrorError, MirrorRecord, MirrorStore, QueryOrder};
use crate::view::compute_summary;

mod catalog;
mod loads;
mod profile;
mod subscriptions;

pub use self::subscriptions::SubscriptionMutation;
use self::loads::{LoadSlot, cancellable};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("network or backend error: {0}")]
    Network(RemoteError),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed remote data: {0}")]
    Parse(#[from] ParseError),

    #[error("local persistence error: {0}")]
    LocalPersistence(#[from] MirrorError),

    #[error("load cancelled")]
    Cancelled,
}

impl From<RemoteError> for SyncError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound { .. } => SyncError::NotFound(err.to_string()),
            other => SyncError::Network(other),
        }
    }
}

pub struct SyncCoordinator<R, M> {
    remote: R,
    mirror: M,
    account: AccountId,
    session: Mutex<SessionState>,
    subscriptions_load: LoadSlot,
}

impl<R: RemoteGateway, M: MirrorStore> SyncCoordinator<R, M> {
    pub fn new(remote: R, mirror: M, account: AccountId, session: SessionState) -> Self {
        Self {
            remote,
            mirror,
            account,
            session: Mutex::new(session),
            subscriptions_load: LoadSlot::default(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Snapshot of the current per-collection state.
    pub fn session(&self) -> SessionState {
        self.session_guard().clone()
    }

    /// Forces the next catalog load to read from the remote.
    pub fn invalidate_catalog(&self) {
        self.session_guard().invalidate_catalog();
    }

    fn session_guard(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts fetched records whose key is not mirrored yet. Existing rows are left as is.
    ///
    /// Stops at the first mirror error; rows staged before it stay staged.
    fn mirror_new_records<T: MirrorRecord>(&self, fetched: &[T]) -> Result<usize, MirrorError> {
        let existing: HashSet<String> = self
            .mirror
            .query::<T>(QueryOrder::Stored)?
            .iter()
            .map(|r| r.key().to_string())
            .collect();

        let mut inserted = 0;
        for record in fetched.iter().filter(|r| !existing.contains(r.key())) {
            self.mirror.insert(record.clone())?;
            inserted += 1;
        }
        if inserted > 0 {
            self.mirror.save()?;
        }
        Ok(inserted)
    }

    /// Updates the row, inserting it when absent.
    fn upsert<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError> {
        match self.mirror.update(record.clone()) {
            Err(MirrorError::Missing { .. }) => self.mirror.insert(record),
            other => other,
        }
    }
}
