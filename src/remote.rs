//! Remote Gateway: the document-store capability the sync layer consumes.

use async_trait::async_trait;

mod document;
mod http_client;
mod memory;
mod schema;
mod types;

pub use self::document::{InvalidFieldPath, apply_field_update, merge_documents};
pub use self::http_client::HttpGateway;
pub use self::memory::{CallCounts, MemoryGateway};
pub use self::schema::*;
pub use self::types::*;

/// Raw document payload as stored remotely.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("{0}")]
    Transport(String),

    #[error("{operation} failed with status {status}: {message}")]
    Status {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("document {collection}/{key} not found")]
    NotFound { collection: String, key: String },

    #[error("{0}")]
    Decode(String),
}

/// Single-shot document operations. Implementations never retry.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// `Ok(None)` when the document does not exist.
    async fn get_document(&self, collection: &str, key: &str)
    -> Result<Option<Document>, RemoteError>;

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: Document,
        merge: bool,
    ) -> Result<(), RemoteError>;

    /// Fails with [`RemoteError::NotFound`] when the document does not exist.
    async fn update_field(
        &self,
        collection: &str,
        key: &str,
        path: &FieldPath,
        update: FieldUpdate,
    ) -> Result<(), RemoteError>;

    async fn list_documents(&self, collection: &str)
    -> Result<Vec<(String, Document)>, RemoteError>;
}
