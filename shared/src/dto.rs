use crate::constants::*;
use crate::types::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Car DTOs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CarPayload {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 60))]
    pub brand: String,

    #[validate(length(min = 1, max = 60))]
    pub model: String,

    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,

    /// Must be non-negative; checked by the service since `range` does not
    /// cover decimals.
    pub price: Decimal,

    #[validate(range(min = 0))]
    pub mileage_km: i64,

    pub body_style: BodyStyle,
    pub transmission: Transmission,
    pub fuel_type: FuelType,

    #[validate(range(min = 0, max = 20000))]
    pub engine_cc: i32,

    #[validate(range(min = 0, max = 3000))]
    pub power_hp: i32,

    #[validate(length(max = 5000))]
    pub description: String,

    #[validate(length(max = 2000))]
    pub features: String,

    #[validate(length(max = 200))]
    pub contact: String,

    #[validate(length(max = 200))]
    pub location: String,

    /// Pre-existing image URLs to keep, in display order. Empty on create.
    #[serde(default)]
    pub kept_images: Vec<String>,

    /// Index of the cover image in the final image list (kept ++ uploaded).
    #[serde(default)]
    pub cover_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarResponse {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage_km: i64,
    pub body_style: BodyStyle,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub engine_cc: i32,
    pub power_hp: i32,
    pub description: String,
    pub features: String,
    pub contact: String,
    pub location: String,
    pub images: Vec<String>,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

// Rental DTOs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RentalPayload {
    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 60))]
    pub brand: String,

    #[validate(length(min = 1, max = 60))]
    pub model: String,

    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,

    /// Free-text pricing, one or more comma-separated
    /// "days: price-per-day" intervals.
    #[validate(length(min = 1, max = 300))]
    pub price_text: String,

    #[validate(range(min = 0))]
    pub mileage_km: i64,

    pub body_style: BodyStyle,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub drivetrain: Drivetrain,

    #[validate(range(min = 0, max = 20000))]
    pub engine_cc: i32,

    #[validate(range(min = 0, max = 3000))]
    pub power_hp: i32,

    #[validate(length(max = 5000))]
    pub description: String,

    #[validate(length(max = 2000))]
    pub features: String,

    #[validate(length(max = 200))]
    pub contact: String,

    #[validate(length(max = 200))]
    pub location: String,

    #[serde(default)]
    pub kept_images: Vec<String>,

    #[serde(default)]
    pub cover_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalResponse {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_text: String,
    /// Representative per-day price extracted from `price_text`; 0 when
    /// nothing parseable is found.
    pub price_per_day: i64,
    pub mileage_km: i64,
    pub body_style: BodyStyle,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub drivetrain: Drivetrain,
    pub engine_cc: i32,
    pub power_hp: i32,
    pub description: String,
    pub features: String,
    pub contact: String,
    pub location: String,
    pub images: Vec<String>,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

// Brand DTOs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrandPayload {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Site configuration DTOs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SiteConfigPayload {
    #[validate(length(min = 1, max = 120))]
    pub site_name: String,

    #[validate(length(max = 200))]
    pub slogan: String,

    #[validate(length(max = 200))]
    pub secondary_slogan: String,

    #[validate(length(max = 200))]
    pub location: String,

    #[validate(length(max = 40))]
    pub phone: String,

    #[validate(length(max = 300))]
    pub facebook_url: String,

    #[validate(length(max = 120))]
    pub seo_title: String,

    #[validate(length(max = 300))]
    pub seo_description: String,

    #[validate(length(max = 300))]
    pub seo_keywords: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfigResponse {
    pub site_name: String,
    pub slogan: String,
    pub secondary_slogan: String,
    pub logo_url: String,
    pub banner_url: String,
    pub location: String,
    pub phone: String,
    pub facebook_url: String,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
}

// Pagination
/// Ordering key of the last document seen, for cursor-based "load more".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCursor {
    pub created_at: DateTime<Utc>,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub limit: usize,
    pub next_cursor: Option<ListingCursor>,
    /// Heuristic: a full page implies more may exist. Can be wrong by one
    /// empty page when the collection size is an exact multiple of the
    /// page size; callers must tolerate an empty follow-up page.
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub data: Vec<T>,
    /// How many pages of the underlying feed were fetched to build this
    /// result. Filters only see fetched pages.
    pub pages_fetched: usize,
    pub exhausted: bool,
}

impl CarPayload {
    /// Upper bound check shared by create and edit: runs before any
    /// upload happens.
    pub fn within_image_budget(&self, pending_uploads: usize) -> bool {
        self.kept_images.len() + pending_uploads <= MAX_IMAGES_PER_LISTING
    }
}

impl RentalPayload {
    pub fn within_image_budget(&self, pending_uploads: usize) -> bool {
        self.kept_images.len() + pending_uploads <= MAX_IMAGES_PER_LISTING
    }
}
