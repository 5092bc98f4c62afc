//! In-memory store implementations backing the test suites.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{after_cursor, descending_order, BlobStore, Document, DocumentStore, PageQuery};
use crate::error::AppError;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, HashMap<String, Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        created_at: DateTime<Utc>,
        fields: serde_json::Value,
    ) -> Result<Document, AppError> {
        let doc = Document {
            id: id.to_string(),
            created_at,
            fields,
        };
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc.clone());
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list_page(
        &self,
        collection: &str,
        query: PageQuery,
    ) -> Result<Vec<Document>, AppError> {
        let mut docs: Vec<Document> = self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        docs.sort_by(descending_order);
        if let Some(cursor) = &query.after {
            docs.retain(|doc| after_cursor(doc, cursor));
        }
        docs.truncate(query.limit);
        Ok(docs)
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let mut docs: Vec<Document> = self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        docs.sort_by(descending_order);
        Ok(docs)
    }
}

pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    public_base_url: String,
    /// Test hook: make every delete fail to exercise best-effort cleanup.
    fail_deletes: AtomicBool,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("https://blobs.test")
    }
}

impl MemoryBlobStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn contains(&self, url: &str) -> bool {
        let prefix = format!("{}/", self.public_base_url);
        url.strip_prefix(&prefix)
            .map(|path| self.objects.lock().unwrap().contains_key(path))
            .unwrap_or(false)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, AppError> {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes);
        Ok(format!("{}/{}", self.public_base_url, path))
    }

    async fn delete(&self, url: &str) -> Result<(), AppError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("delete of '{}' failed", url)));
        }
        let prefix = format!("{}/", self.public_base_url);
        let path = url
            .strip_prefix(&prefix)
            .ok_or_else(|| AppError::Storage(format!("'{}' is not a managed object URL", url)))?;
        self.objects.lock().unwrap().remove(path);
        Ok(())
    }
}
