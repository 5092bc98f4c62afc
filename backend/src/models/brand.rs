use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use showroom_platform_shared::BrandResponse;

use super::str_field;
use crate::store::Document;

#[derive(Debug, Clone)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Brand {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: str_field(&doc.fields, "name"),
            created_at: doc.created_at,
        }
    }

    pub fn to_fields(&self) -> Value {
        json!({ "name": self.name })
    }

    pub fn to_response(&self) -> BrandResponse {
        BrandResponse {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}
