//! Thin clients for the hosted document database and object storage.
//!
//! Both vendors are external collaborators; these traits are the seam the
//! rest of the service talks through. The REST implementations do no
//! retrying, no timeouts and no caching of their own.

pub mod memory;
pub mod rest;

pub use memory::{MemoryBlobStore, MemoryDocumentStore};
pub use rest::{RestBlobStore, RestDocumentStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showroom_platform_shared::ListingCursor;

use crate::error::AppError;

/// A stored document: vendor-assigned shape is loose JSON; typing happens
/// at the model boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub fields: serde_json::Value,
}

impl Document {
    pub fn cursor(&self) -> ListingCursor {
        ListingCursor {
            created_at: self.created_at,
            id: self.id.clone(),
        }
    }
}

/// A single page request against the only supported server-side order:
/// created_at descending, document id as tiebreak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: usize,
    pub after: Option<ListingCursor>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    /// Upsert by id. `created_at` is caller-supplied so edits preserve the
    /// original ordering key.
    async fn set(
        &self,
        collection: &str,
        id: &str,
        created_at: DateTime<Utc>,
        fields: serde_json::Value,
    ) -> Result<Document, AppError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError>;

    /// One page ordered by created_at descending, strictly after the
    /// cursor when one is given.
    async fn list_page(&self, collection: &str, query: PageQuery)
        -> Result<Vec<Document>, AppError>;

    /// Everything in the collection, same descending order. Only used for
    /// small collections (brands).
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, AppError>;
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `path` and return the public download URL.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    /// Delete the object behind a previously returned public URL.
    async fn delete(&self, url: &str) -> Result<(), AppError>;
}

/// Descending (created_at, id) ordering used by both store implementations.
pub(crate) fn descending_order(a: &Document, b: &Document) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Whether `doc` comes strictly after `cursor` in descending order.
pub(crate) fn after_cursor(doc: &Document, cursor: &ListingCursor) -> bool {
    doc.created_at < cursor.created_at
        || (doc.created_at == cursor.created_at && doc.id < cursor.id)
}
