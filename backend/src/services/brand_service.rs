use chrono::Utc;
use showroom_platform_shared::{BrandPayload, BrandResponse, BRANDS_COLLECTION};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::Brand;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct BrandService {
    docs: Arc<dyn DocumentStore>,
}

impl BrandService {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self { docs }
    }

    pub async fn add_brand(&self, payload: BrandPayload) -> Result<BrandResponse, AppError> {
        payload.validate()?;
        let name = payload.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Brand name cannot be empty".to_string()));
        }

        // Exact string equality: "BMW" and "bmw" are distinct brands here.
        let existing = self.docs.list_all(BRANDS_COLLECTION).await?;
        if existing
            .iter()
            .any(|doc| Brand::from_document(doc).name == name)
        {
            return Err(AppError::Conflict(format!(
                "Brand '{}' already exists",
                name
            )));
        }

        let id = Uuid::new_v4().to_string();
        let brand = Brand {
            id: id.clone(),
            name,
            created_at: Utc::now(),
        };
        let doc = self
            .docs
            .set(BRANDS_COLLECTION, &id, brand.created_at, brand.to_fields())
            .await?;

        info!("added brand '{}'", brand.name);
        Ok(Brand::from_document(&doc).to_response())
    }

    /// Alphabetical by name, not by creation time.
    pub async fn list_brands(&self) -> Result<Vec<BrandResponse>, AppError> {
        let mut brands: Vec<BrandResponse> = self
            .docs
            .list_all(BRANDS_COLLECTION)
            .await?
            .iter()
            .map(|doc| Brand::from_document(doc).to_response())
            .collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }

    pub async fn delete_brand(&self, id: &str) -> Result<(), AppError> {
        self.docs
            .get(BRANDS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Brand not found".to_string()))?;
        self.docs.delete(BRANDS_COLLECTION, id).await?;
        info!("deleted brand {}", id);
        Ok(())
    }
}
