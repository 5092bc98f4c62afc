use super::*;
use crate::services::images::tests::png_file;
use crate::store::{MemoryBlobStore, MemoryDocumentStore};
use chrono::TimeZone;
use rust_decimal::Decimal;
use serde_json::json;
use showroom_platform_shared::{BodyStyle, FuelType, Transmission};

fn setup() -> (CarService, Arc<MemoryDocumentStore>, Arc<MemoryBlobStore>) {
    let docs = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::default());
    let service = CarService::new(docs.clone(), blobs.clone());
    (service, docs, blobs)
}

fn payload(title: &str, brand: &str, price: i64) -> CarPayload {
    CarPayload {
        title: title.to_string(),
        brand: brand.to_string(),
        model: "base".to_string(),
        year: 2018,
        price: Decimal::from(price),
        mileage_km: 120_000,
        body_style: BodyStyle::Sedan,
        transmission: Transmission::Manual,
        fuel_type: FuelType::Diesel,
        engine_cc: 1968,
        power_hp: 150,
        description: String::new(),
        features: String::new(),
        contact: "0700 000 000".to_string(),
        location: "Cluj".to_string(),
        kept_images: Vec::new(),
        cover_index: None,
    }
}

#[tokio::test]
async fn create_uploads_images_then_writes_the_document() {
    let (service, docs, blobs) = setup();

    let mut request = payload("VW Golf", "Volkswagen", 9500);
    request.cover_index = Some(1);
    let files = vec![png_file("one.png", 10, 10), png_file("two.png", 10, 10)];

    let car = service.create_car(request, files).await.unwrap();
    assert_eq!(car.images.len(), 2);
    assert_eq!(car.cover_image, car.images[1]);
    assert_eq!(blobs.object_count(), 2);
    assert_eq!(docs.len(CARS_COLLECTION), 1);
}

#[tokio::test]
async fn create_rejects_over_budget_before_any_upload() {
    let (service, docs, blobs) = setup();

    let files: Vec<_> = (0..MAX_IMAGES_PER_LISTING + 1)
        .map(|n| png_file(&format!("img-{}.png", n), 8, 8))
        .collect();
    let err = service
        .create_car(payload("Audi A4", "Audi", 15000), files)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(blobs.object_count(), 0);
    assert_eq!(docs.len(CARS_COLLECTION), 0);
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let (service, _, blobs) = setup();
    let mut request = payload("", "Audi", 15000);
    request.year = 1800;

    let err = service.create_car(request, Vec::new()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(blobs.object_count(), 0);
}

#[tokio::test]
async fn update_drops_removed_blobs_and_recomputes_the_cover() {
    let (service, _, blobs) = setup();

    let created = service
        .create_car(
            payload("BMW 320d", "BMW", 13000),
            vec![png_file("a.png", 10, 10), png_file("b.png", 10, 10)],
        )
        .await
        .unwrap();
    let dropped = created.images[0].clone();
    let kept = created.images[1].clone();

    let mut edit = payload("BMW 320d xDrive", "BMW", 13500);
    edit.kept_images = vec![kept.clone()];
    edit.cover_index = Some(1);
    let updated = service
        .update_car(&created.id, edit, vec![png_file("c.png", 10, 10)])
        .await
        .unwrap();

    // Final order is kept ++ new; the cover index addresses that order.
    assert_eq!(updated.images.len(), 2);
    assert_eq!(updated.images[0], kept);
    assert_eq!(updated.cover_image, updated.images[1]);
    assert!(!blobs.contains(&dropped));
    assert!(blobs.contains(&kept));
}

#[tokio::test]
async fn update_enforces_the_image_budget_before_uploading() {
    let (service, _, blobs) = setup();
    let created = service
        .create_car(payload("Skoda Fabia", "Skoda", 6000), vec![png_file("a.png", 8, 8)])
        .await
        .unwrap();

    let mut edit = payload("Skoda Fabia", "Skoda", 6000);
    edit.kept_images = (0..MAX_IMAGES_PER_LISTING)
        .map(|n| format!("https://blobs.test/cars/x/{}.jpg", n))
        .collect();
    let before = blobs.object_count();

    let err = service
        .update_car(&created.id, edit, vec![png_file("extra.png", 8, 8)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(blobs.object_count(), before);
}

#[tokio::test]
async fn cover_stays_a_member_of_the_final_list_after_any_edit() {
    let (service, _, _) = setup();
    let created = service
        .create_car(payload("Dacia Duster", "Dacia", 11000), vec![png_file("a.png", 8, 8)])
        .await
        .unwrap();

    // Wildly out-of-range cover index.
    let mut edit = payload("Dacia Duster", "Dacia", 11000);
    edit.kept_images = created.images.clone();
    edit.cover_index = Some(99);
    let updated = service.update_car(&created.id, edit, Vec::new()).await.unwrap();
    assert!(updated.images.contains(&updated.cover_image));

    // Everything removed: cover must end up empty.
    let mut strip = payload("Dacia Duster", "Dacia", 11000);
    strip.kept_images = Vec::new();
    let stripped = service.update_car(&created.id, strip, Vec::new()).await.unwrap();
    assert!(stripped.images.is_empty());
    assert_eq!(stripped.cover_image, "");
}

#[tokio::test]
async fn delete_removes_the_document_even_when_blob_cleanup_fails() {
    let (service, docs, blobs) = setup();
    let created = service
        .create_car(payload("Opel Astra", "Opel", 7000), vec![png_file("a.png", 8, 8)])
        .await
        .unwrap();

    blobs.fail_deletes(true);
    service.delete_car(&created.id).await.unwrap();

    assert_eq!(docs.len(CARS_COLLECTION), 0);
    // Cleanup failed and was swallowed; the blob is orphaned by design.
    assert_eq!(blobs.object_count(), 1);
}

#[tokio::test]
async fn missing_listing_maps_to_not_found() {
    let (service, _, _) = setup();
    assert!(matches!(
        service.get_car("nope").await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        service.delete_car("nope").await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

async fn seed_car(docs: &MemoryDocumentStore, id: &str, brand: &str, price: i64, stamp: i64) {
    docs.set(
        CARS_COLLECTION,
        id,
        chrono::Utc.timestamp_opt(stamp, 0).unwrap(),
        json!({ "title": id, "brand": brand, "price": price }),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn list_pages_forward_with_the_cursor() {
    let (service, docs, _) = setup();
    for n in 0..5 {
        seed_car(&docs, &format!("car-{}", n), "BMW", 100, 1000 + n).await;
    }

    let first = service.list_cars(2, None).await.unwrap();
    assert_eq!(first.data.len(), 2);
    assert!(first.has_more);
    assert_eq!(first.data[0].id, "car-4");

    let second = service.list_cars(2, first.next_cursor).await.unwrap();
    assert_eq!(second.data[0].id, "car-2");

    let third = service.list_cars(2, second.next_cursor).await.unwrap();
    assert_eq!(third.data.len(), 1);
    assert!(!third.has_more);
}

#[tokio::test]
async fn search_filters_exactly_within_the_price_range() {
    let (service, docs, _) = setup();
    seed_car(&docs, "cheap", "BMW", 100, 1).await;
    seed_car(&docs, "low", "BMW", 200, 2).await;
    seed_car(&docs, "high", "Audi", 400, 3).await;
    seed_car(&docs, "rich", "BMW", 900, 4).await;

    let filter = ListingFilter {
        min_price: Some(Decimal::from(200)),
        max_price: Some(Decimal::from(400)),
        ..Default::default()
    };
    let result = service.search_cars(filter, 10, 10).await.unwrap();

    let mut ids: Vec<&str> = result.data.iter().map(|c| c.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["high", "low"]);
    assert!(result.exhausted);
}

#[tokio::test]
async fn search_stops_at_the_page_cap_and_reports_not_exhausted() {
    let (service, docs, _) = setup();
    for n in 0..30 {
        seed_car(&docs, &format!("car-{:02}", n), "BMW", 100, 1000 + n).await;
    }

    let result = service
        .search_cars(ListingFilter::default(), 10, 2)
        .await
        .unwrap();
    assert_eq!(result.pages_fetched, 2);
    assert_eq!(result.data.len(), 20);
    assert!(!result.exhausted);
}
