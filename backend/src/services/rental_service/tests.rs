use super::*;
use crate::services::images::tests::png_file;
use crate::store::{MemoryBlobStore, MemoryDocumentStore};
use chrono::TimeZone;
use rust_decimal::Decimal;
use serde_json::json;
use showroom_platform_shared::{BodyStyle, Drivetrain, FuelType, PriceSort, Transmission};

fn setup() -> (RentalService, Arc<MemoryDocumentStore>, Arc<MemoryBlobStore>) {
    let docs = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::default());
    let service = RentalService::new(docs.clone(), blobs.clone());
    (service, docs, blobs)
}

fn payload(title: &str, price_text: &str) -> RentalPayload {
    RentalPayload {
        title: title.to_string(),
        brand: "Dacia".to_string(),
        model: "Logan".to_string(),
        year: 2021,
        price_text: price_text.to_string(),
        mileage_km: 40_000,
        body_style: BodyStyle::Sedan,
        transmission: Transmission::Manual,
        fuel_type: FuelType::Petrol,
        drivetrain: Drivetrain::Fwd,
        engine_cc: 999,
        power_hp: 90,
        description: String::new(),
        features: String::new(),
        contact: "0711 111 111".to_string(),
        location: "Bucuresti".to_string(),
        kept_images: Vec::new(),
        cover_index: None,
    }
}

#[tokio::test]
async fn create_keeps_the_interval_text_verbatim() {
    let (service, _, _) = setup();
    let rental = service
        .create_rental(
            payload("Logan", "3 zile: 100 €/zi, 7 zile: 80 €/zi"),
            vec![png_file("a.png", 8, 8)],
        )
        .await
        .unwrap();

    assert_eq!(rental.price_text, "3 zile: 100 €/zi, 7 zile: 80 €/zi");
    assert_eq!(rental.price_per_day, 100);
    assert_eq!(rental.cover_image, rental.images[0]);
}

#[tokio::test]
async fn unparseable_pricing_still_creates_the_listing() {
    let (service, _, _) = setup();
    let rental = service
        .create_rental(payload("Logan", "pret la cerere"), Vec::new())
        .await
        .unwrap();
    assert_eq!(rental.price_per_day, 0);
}

#[tokio::test]
async fn create_rejects_over_budget_before_any_upload() {
    let (service, _, blobs) = setup();
    let files: Vec<_> = (0..MAX_IMAGES_PER_LISTING + 1)
        .map(|n| png_file(&format!("img-{}.png", n), 8, 8))
        .collect();

    let err = service
        .create_rental(payload("Logan", "250"), files)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(blobs.object_count(), 0);
}

#[tokio::test]
async fn update_replaces_images_and_cleans_up() {
    let (service, _, blobs) = setup();
    let created = service
        .create_rental(payload("Logan", "250"), vec![png_file("a.png", 8, 8)])
        .await
        .unwrap();
    let old = created.images[0].clone();

    let mut edit = payload("Logan facelift", "260");
    edit.kept_images = Vec::new();
    let updated = service
        .update_rental(&created.id, edit, vec![png_file("b.png", 8, 8)])
        .await
        .unwrap();

    assert_eq!(updated.images.len(), 1);
    assert_ne!(updated.images[0], old);
    assert!(!blobs.contains(&old));
    assert_eq!(updated.cover_image, updated.images[0]);
}

#[tokio::test]
async fn delete_is_tolerant_of_blob_failures() {
    let (service, docs, blobs) = setup();
    let created = service
        .create_rental(payload("Logan", "250"), vec![png_file("a.png", 8, 8)])
        .await
        .unwrap();

    blobs.fail_deletes(true);
    service.delete_rental(&created.id).await.unwrap();
    assert_eq!(docs.len(RENTALS_COLLECTION), 0);
}

async fn seed_rental(docs: &MemoryDocumentStore, id: &str, price_text: &str, stamp: i64) {
    docs.set(
        RENTALS_COLLECTION,
        id,
        chrono::Utc.timestamp_opt(stamp, 0).unwrap(),
        json!({ "title": id, "brand": "Dacia", "price_text": price_text }),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn search_sorts_by_the_extracted_interval_price() {
    let (service, docs, _) = setup();
    seed_rental(&docs, "mid", "3 zile: 100 €/zi, 7 zile: 80 €/zi", 1).await;
    seed_rental(&docs, "flat", "250", 2).await;
    seed_rental(&docs, "unknown", "la cerere", 3).await;

    let filter = ListingFilter {
        sort: Some(PriceSort::PriceAsc),
        ..Default::default()
    };
    let result = service.search_rentals(filter, 10, 10).await.unwrap();
    let keys: Vec<i64> = result.data.iter().map(|r| r.price_per_day).collect();
    assert_eq!(keys, vec![0, 100, 250]);
}

#[tokio::test]
async fn search_price_range_uses_the_extracted_key() {
    let (service, docs, _) = setup();
    seed_rental(&docs, "a", "3 zile: 100 €/zi", 1).await;
    seed_rental(&docs, "b", "40", 2).await;
    seed_rental(&docs, "c", "2 zile: 300 €/zi", 3).await;

    let filter = ListingFilter {
        min_price: Some(Decimal::from(50)),
        max_price: Some(Decimal::from(200)),
        ..Default::default()
    };
    let result = service.search_rentals(filter, 10, 10).await.unwrap();
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].id, "a");
}

#[tokio::test]
async fn list_pages_newest_first() {
    let (service, docs, _) = setup();
    for n in 0..3 {
        seed_rental(&docs, &format!("r-{}", n), "100", 100 + n).await;
    }

    let page = service.list_rentals(2, None).await.unwrap();
    assert_eq!(page.data[0].id, "r-2");
    assert!(page.has_more);

    let rest = service.list_rentals(2, page.next_cursor).await.unwrap();
    assert_eq!(rest.data.len(), 1);
    assert!(!rest.has_more);
}
