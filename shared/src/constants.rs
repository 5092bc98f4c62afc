use std::time::Duration;

// Document collections on the hosted backend
pub const CARS_COLLECTION: &str = "cars";
pub const RENTALS_COLLECTION: &str = "rentals";
pub const BRANDS_COLLECTION: &str = "brands";
pub const CONFIG_COLLECTION: &str = "config";
pub const CONFIG_DOC_ID: &str = "public";

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 50;
// A single search request walks at most this many pages of the feed;
// filters only see what has been fetched.
pub const MAX_SEARCH_PAGES: usize = 10;

// Listing constraints
pub const MAX_IMAGES_PER_LISTING: usize = 12;

// Image intake limits
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10 MiB
pub const MAX_SOURCE_DIMENSION_PX: u32 = 6000;
pub const TARGET_MAX_DIMENSION_PX: u32 = 1920;
pub const TARGET_ENCODED_BYTES: usize = 500 * 1024;
pub const JPEG_QUALITY_START: u8 = 85;
pub const JPEG_QUALITY_FLOOR: u8 = 40;
pub const JPEG_QUALITY_STEP: u8 = 15;
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

// Site configuration cache
pub const DEFAULT_CONFIG_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
