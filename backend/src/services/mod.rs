//! Business services wired between the HTTP handlers and the store layer.

pub mod brand_service;
pub mod car_service;
pub mod config_service;
pub mod feed;
pub mod images;
pub mod rental_service;
pub mod uploads;

pub use brand_service::BrandService;
pub use car_service::CarService;
pub use config_service::SiteConfigService;
pub use feed::{ListingFeed, ListingFilter};
pub use images::{ProcessedImage, UploadedFile};
pub use rental_service::RentalService;
