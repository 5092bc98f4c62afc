use chrono::Utc;
use showroom_platform_shared::{
    ListingCursor, PaginatedResponse, RentalPayload, RentalResponse, SearchResponse,
    MAX_IMAGES_PER_LISTING, MAX_PAGE_SIZE, RENTALS_COLLECTION,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::feed::{ListingFeed, ListingFilter};
use super::images::UploadedFile;
use super::uploads::{delete_blobs_best_effort, resolve_cover, upload_listing_images};
use crate::error::AppError;
use crate::models::Rental;
use crate::store::{BlobStore, Document, DocumentStore, PageQuery};

/// CRUD orchestration for cars-for-rent. Mirrors the sale-side flow; the
/// difference is the free-text interval pricing, which is stored as-is and
/// only interpreted when sorting or filtering.
#[derive(Clone)]
pub struct RentalService {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
}

impl RentalService {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { docs, blobs }
    }

    pub async fn create_rental(
        &self,
        payload: RentalPayload,
        files: Vec<UploadedFile>,
    ) -> Result<RentalResponse, AppError> {
        payload.validate()?;
        if !payload.within_image_budget(files.len()) {
            return Err(AppError::Validation(format!(
                "A listing can have at most {} images",
                MAX_IMAGES_PER_LISTING
            )));
        }

        let id = Uuid::new_v4().to_string();
        let uploaded =
            upload_listing_images(self.blobs.as_ref(), RENTALS_COLLECTION, &id, &files).await?;

        let mut images = payload.kept_images.clone();
        images.extend(uploaded);
        let cover = resolve_cover(&images, payload.cover_index);

        let rental = Rental::from_payload(id.clone(), &payload, images, cover, Utc::now());
        let doc = self
            .docs
            .set(RENTALS_COLLECTION, &id, rental.created_at, rental.to_fields())
            .await?;

        info!("created rental listing {} ('{}')", id, rental.title);
        Ok(Rental::from_document(&doc).to_response())
    }

    pub async fn update_rental(
        &self,
        id: &str,
        payload: RentalPayload,
        files: Vec<UploadedFile>,
    ) -> Result<RentalResponse, AppError> {
        payload.validate()?;
        let existing_doc = self
            .docs
            .get(RENTALS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;
        let existing = Rental::from_document(&existing_doc);

        if !payload.within_image_budget(files.len()) {
            return Err(AppError::Validation(format!(
                "A listing can have at most {} images",
                MAX_IMAGES_PER_LISTING
            )));
        }

        let removed: Vec<String> = existing
            .images
            .iter()
            .filter(|url| !payload.kept_images.contains(url))
            .cloned()
            .collect();
        delete_blobs_best_effort(self.blobs.as_ref(), &removed).await;

        let uploaded =
            upload_listing_images(self.blobs.as_ref(), RENTALS_COLLECTION, id, &files).await?;

        let mut images = payload.kept_images.clone();
        images.extend(uploaded);
        let cover = resolve_cover(&images, payload.cover_index);

        let rental =
            Rental::from_payload(id.to_string(), &payload, images, cover, existing.created_at);
        let doc = self
            .docs
            .set(RENTALS_COLLECTION, id, rental.created_at, rental.to_fields())
            .await?;

        info!("updated rental listing {}", id);
        Ok(Rental::from_document(&doc).to_response())
    }

    pub async fn delete_rental(&self, id: &str) -> Result<(), AppError> {
        let doc = self
            .docs
            .get(RENTALS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;
        let rental = Rental::from_document(&doc);

        delete_blobs_best_effort(self.blobs.as_ref(), &rental.images).await;
        self.docs.delete(RENTALS_COLLECTION, id).await?;

        info!("deleted rental listing {}", id);
        Ok(())
    }

    pub async fn get_rental(&self, id: &str) -> Result<RentalResponse, AppError> {
        let doc = self
            .docs
            .get(RENTALS_COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;
        Ok(Rental::from_document(&doc).to_response())
    }

    pub async fn list_rentals(
        &self,
        limit: usize,
        after: Option<ListingCursor>,
    ) -> Result<PaginatedResponse<RentalResponse>, AppError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let page = self
            .docs
            .list_page(RENTALS_COLLECTION, PageQuery { limit, after })
            .await?;

        let has_more = page.len() == limit;
        let next_cursor = page.last().map(Document::cursor);
        let data = page
            .iter()
            .map(|doc| Rental::from_document(doc).to_response())
            .collect();

        Ok(PaginatedResponse {
            data,
            limit,
            next_cursor,
            has_more,
        })
    }

    pub async fn search_rentals(
        &self,
        filter: ListingFilter,
        page_size: usize,
        max_pages: usize,
    ) -> Result<SearchResponse<RentalResponse>, AppError> {
        let mut feed = ListingFeed::new(page_size.clamp(1, MAX_PAGE_SIZE));
        let mut pages_fetched = 0;
        while pages_fetched < max_pages {
            let Some(request) = feed.next_request() else {
                break;
            };
            let docs = self.docs.list_page(RENTALS_COLLECTION, request).await?;
            feed.ingest(docs.iter().map(Rental::from_document).collect());
            pages_fetched += 1;
        }

        Ok(SearchResponse {
            data: feed
                .filtered(&filter)
                .into_iter()
                .map(Rental::to_response)
                .collect(),
            pages_fetched,
            exhausted: !feed.has_more(),
        })
    }
}

#[cfg(test)]
mod tests;
