use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use showroom_platform_shared::ListingCursor;

use super::{BlobStore, Document, DocumentStore, PageQuery};
use crate::error::AppError;

/// REST client for the hosted document database.
#[derive(Clone)]
pub struct RestDocumentStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DocumentPayload {
    id: String,
    created_at: DateTime<Utc>,
    fields: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    documents: Vec<DocumentPayload>,
}

impl From<DocumentPayload> for Document {
    fn from(payload: DocumentPayload) -> Self {
        Document {
            id: payload.id,
            created_at: payload.created_at,
            fields: payload.fields,
        }
    }
}

impl RestDocumentStore {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/collections/{}/docs/{}", self.base_url, collection, id)
    }

    fn query_url(&self, collection: &str) -> String {
        format!("{}/collections/{}/query", self.base_url, collection)
    }

    async fn run_query(&self, collection: &str, body: serde_json::Value)
        -> Result<Vec<Document>, AppError>
    {
        let response = self
            .http
            .post(self.query_url(collection))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::BackendStatus(format!(
                "query on '{}' failed with {}",
                collection,
                response.status()
            )));
        }

        let page: QueryResponse = response.json().await?;
        Ok(page.documents.into_iter().map(Document::from).collect())
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let response = self
            .http
            .get(self.doc_url(collection, id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::BackendStatus(format!(
                "get {}/{} failed with {}",
                collection,
                id,
                response.status()
            )));
        }

        let payload: DocumentPayload = response.json().await?;
        Ok(Some(payload.into()))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        created_at: DateTime<Utc>,
        fields: serde_json::Value,
    ) -> Result<Document, AppError> {
        let payload = DocumentPayload {
            id: id.to_string(),
            created_at,
            fields,
        };
        let response = self
            .http
            .put(self.doc_url(collection, id))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::BackendStatus(format!(
                "set {}/{} failed with {}",
                collection,
                id,
                response.status()
            )));
        }

        let stored: DocumentPayload = response.json().await?;
        Ok(stored.into())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.doc_url(collection, id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        // Deleting an already-gone document is not an error.
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::BackendStatus(format!(
                "delete {}/{} failed with {}",
                collection,
                id,
                response.status()
            )));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        collection: &str,
        query: PageQuery,
    ) -> Result<Vec<Document>, AppError> {
        let mut body = json!({
            "order_by": "created_at",
            "direction": "desc",
            "limit": query.limit,
        });
        if let Some(ListingCursor { created_at, id }) = query.after {
            body["start_after"] = json!({ "created_at": created_at, "id": id });
        }
        self.run_query(collection, body).await
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let body = json!({
            "order_by": "created_at",
            "direction": "desc",
        });
        self.run_query(collection, body).await
    }
}

/// REST client for the hosted object storage. Public URLs are derived from
/// the object path, so deletion works back from the URL.
#[derive(Clone)]
pub struct RestBlobStore {
    http: reqwest::Client,
    base_url: String,
    public_base_url: String,
    api_key: String,
}

impl RestBlobStore {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        public_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/objects/{}", self.base_url, path)
    }
}

#[async_trait]
impl BlobStore for RestBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let response = self
            .http
            .put(self.object_url(path))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "upload of '{}' failed with {}",
                path,
                response.status()
            )));
        }
        Ok(format!("{}/{}", self.public_base_url, path))
    }

    async fn delete(&self, url: &str) -> Result<(), AppError> {
        let prefix = format!("{}/", self.public_base_url);
        let path = url
            .strip_prefix(&prefix)
            .ok_or_else(|| AppError::Storage(format!("'{}' is not a managed object URL", url)))?;

        let response = self
            .http
            .delete(self.object_url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::Storage(format!(
                "delete of '{}' failed with {}",
                path,
                response.status()
            )));
        }
        Ok(())
    }
}
