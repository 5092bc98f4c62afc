//! Blob upload/cleanup glue shared by the listing services.

use tracing::warn;
use uuid::Uuid;

use super::images::{process_image, UploadedFile};
use crate::error::AppError;
use crate::store::BlobStore;

/// Resolve the cover URL against the final image order. An out-of-range or
/// missing index falls back to the first image, and to empty when the
/// listing has no images at all.
pub fn resolve_cover(images: &[String], cover_index: Option<usize>) -> String {
    cover_index
        .and_then(|index| images.get(index))
        .or_else(|| images.first())
        .cloned()
        .unwrap_or_default()
}

/// Process and upload pending files sequentially, returning the public URLs
/// in upload order. A file that fails the intake pipeline is skipped and
/// logged; an upload failure aborts the submit. Nothing is retried.
pub async fn upload_listing_images(
    blobs: &dyn BlobStore,
    collection: &str,
    listing_id: &str,
    files: &[UploadedFile],
) -> Result<Vec<String>, AppError> {
    let mut urls = Vec::new();
    for file in files {
        let processed = match process_image(file) {
            Ok(processed) => processed,
            Err(err) => {
                warn!("skipping '{}': {}", file.filename, err);
                continue;
            }
        };
        let path = format!("{}/{}/{}.jpg", collection, listing_id, Uuid::new_v4());
        let url = blobs
            .put(&path, processed.bytes, processed.content_type)
            .await?;
        urls.push(url);
    }
    Ok(urls)
}

/// Best-effort, fire-and-forget per image: failures are logged and
/// swallowed, and never block the caller.
pub async fn delete_blobs_best_effort(blobs: &dyn BlobStore, urls: &[String]) {
    for url in urls {
        if let Err(err) = blobs.delete(url).await {
            warn!("failed to delete blob '{}': {}", url, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::images::tests::png_file;
    use crate::store::MemoryBlobStore;

    #[test]
    fn cover_resolution_honors_the_final_order() {
        let images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        assert_eq!(resolve_cover(&images, Some(1)), "b.jpg");
        assert_eq!(resolve_cover(&images, Some(7)), "a.jpg");
        assert_eq!(resolve_cover(&images, None), "a.jpg");
        assert_eq!(resolve_cover(&[], Some(0)), "");
    }

    #[tokio::test]
    async fn failing_file_is_skipped_without_aborting_the_batch() {
        let blobs = MemoryBlobStore::default();
        let files = vec![
            png_file("first.png", 10, 10),
            UploadedFile {
                filename: "broken.txt".to_string(),
                bytes: b"not an image".to_vec(),
            },
            png_file("second.png", 10, 10),
        ];

        let urls = upload_listing_images(&blobs, "cars", "car-1", &files)
            .await
            .unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(blobs.object_count(), 2);
        for url in &urls {
            assert!(url.starts_with("https://blobs.test/cars/car-1/"));
            assert!(blobs.contains(url));
        }
    }

    #[tokio::test]
    async fn cleanup_failures_are_swallowed() {
        let blobs = MemoryBlobStore::default();
        let url = blobs
            .put("cars/1/a.jpg", vec![1], "image/jpeg")
            .await
            .unwrap();
        blobs.fail_deletes(true);

        delete_blobs_best_effort(&blobs, &[url.clone(), "https://blobs.test/cars/1/b.jpg".to_string()]).await;
        // Object survives the failed delete; nothing propagated.
        assert!(blobs.contains(&url));
    }
}
