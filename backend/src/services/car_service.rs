use chrono::Utc;
use showroom_platform_shared::{
    CarPayload, CarResponse, ListingCursor, PaginatedResponse, SearchResponse,
    CARS_COLLECTION, MAX_IMAGES_PER_LISTING, MAX_PAGE_SIZE,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::feed::{ListingFeed, ListingFilter};
use super::images::UploadedFile;
use super::uploads::{delete_blobs_best_effort, resolve_cover, upload_listing_images};
use crate::error::AppError;
use crate::models::Car;
use crate::store::{BlobStore, Document, DocumentStore, PageQuery};

/// CRUD orchestration for cars-for-sale: validation, image intake, blob
/// cleanup and document writes, in that order.
#[derive(Clone)]
pub struct CarService {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl CarService {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { docs, blobs }
    }

    pub async fn create_car(
        &self,
        payload: CarPayload,
        files: Vec<UploadedFile>,
    ) -> Result<CarResponse, AppError> {
        payload.validate()?;
        if payload.price < rust_decimal::Decimal::ZERO {
            return Err(AppError::Validation("Price cannot be negative".to_string()));
        }
        // The image budget is checked before any upload happens.
        if !payload.within_image_budget(files.len()) {
            return Err(AppError::Validation(format!(
                "A listing can have at most {} images",
                MAX_IMAGES_PER_LISTING
            )));
        }

        let id = Uuid::new_v4().to_string();
        let uploaded =
            upload_listing_images(self.blobs.as_ref(), CARS_COLLECTION, &id, &files).await?;

        let mut images = payload.kept_images.clone();
        images.extend(uploaded);
        let cover = resolve_cover(&images, payload.cover_index);

        let car = Car::from_payload(id.clone(), &payload, images, cover, Utc::now());
        let doc = self
            .docs
            .set(CARS_COLLECTION, &id, car.created_at, car.to_fields())
            .await?;

        info!("created car listing {} ('{}')", id, car.title);
        Ok(Car::from_document(&doc).to_response())
    }

    pub async fn update_car(
        &self,
        id: &str,
        payload: CarPayload,
        files: Vec<UploadedFile>,
    ) -> Result<CarResponse, AppError> {
        payload.validate()?;
        if payload.price < rust_decimal::Decimal::ZERO {
            return Err(AppError::Validation("Price cannot be negative".to_string()));
        }
        let existing_doc = self
            .docs
            .get(CARS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
        let existing = Car::from_document(&existing_doc);

        if !payload.within_image_budget(files.len()) {
            return Err(AppError::Validation(format!(
                "A listing can have at most {} images",
                MAX_IMAGES_PER_LISTING
            )));
        }

        // Images dropped by the edit are cleaned up best-effort before the
        // new ones go up.
        let removed: Vec<String> = existing
            .images
            .iter()
            .filter(|url| !payload.kept_images.contains(url))
            .cloned()
            .collect();
        delete_blobs_best_effort(self.blobs.as_ref(), &removed).await;

        let uploaded =
            upload_listing_images(self.blobs.as_ref(), CARS_COLLECTION, id, &files).await?;

        // Final order is kept ++ newly uploaded; the cover index addresses
        // this concatenation, not the pre-edit order.
        let mut images = payload.kept_images.clone();
        images.extend(uploaded);
        let cover = resolve_cover(&images, payload.cover_index);

        let car = Car::from_payload(id.to_string(), &payload, images, cover, existing.created_at);
        let doc = self
            .docs
            .set(CARS_COLLECTION, id, car.created_at, car.to_fields())
            .await?;

        info!("updated car listing {}", id);
        Ok(Car::from_document(&doc).to_response())
    }

    pub async fn delete_car(&self, id: &str) -> Result<(), AppError> {
        let doc = self
            .docs
            .get(CARS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
        let car = Car::from_document(&doc);

        // Storage cleanup never blocks document deletion.
        delete_blobs_best_effort(self.blobs.as_ref(), &car.images).await;
        self.docs.delete(CARS_COLLECTION, id).await?;

        info!("deleted car listing {}", id);
        Ok(())
    }

    pub async fn get_car(&self, id: &str) -> Result<CarResponse, AppError> {
        let doc = self
            .docs
            .get(CARS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;
        Ok(Car::from_document(&doc).to_response())
    }

    pub async fn list_cars(
        &self,
        limit: usize,
        after: Option<ListingCursor>,
    ) -> Result<PaginatedResponse<CarResponse>, AppError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let page = self
            .docs
            .list_page(CARS_COLLECTION, PageQuery { limit, after })
            .await?;

        let has_more = page.len() == limit;
        let next_cursor = page.last().map(Document::cursor);
        let data = page
            .iter()
            .map(|doc| Car::from_document(doc).to_response())
            .collect();

        Ok(PaginatedResponse {
            data,
            limit,
            next_cursor,
            has_more,
        })
    }

    /// Walk the feed up to `max_pages` pages and filter the accumulated
    /// set. Filters only see what was fetched.
    pub async fn search_cars(
        &self,
        filter: ListingFilter,
        page_size: usize,
        max_pages: usize,
    ) -> Result<SearchResponse<CarResponse>, AppError> {
        let mut feed = ListingFeed::new(page_size.clamp(1, MAX_PAGE_SIZE));
        let mut pages_fetched = 0;
        while pages_fetched < max_pages {
            let Some(request) = feed.next_request() else {
                break;
            };
            let docs = self.docs.list_page(CARS_COLLECTION, request).await?;
            feed.ingest(docs.iter().map(Car::from_document).collect());
            pages_fetched += 1;
        }

        Ok(SearchResponse {
            data: feed
                .filtered(&filter)
                .into_iter()
                .map(Car::to_response)
                .collect(),
            pages_fetched,
            exhausted: !feed.has_more(),
        })
    }
}

#[cfg(test)]
mod tests;
