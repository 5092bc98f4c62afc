use chrono::Utc;
use showroom_platform_shared::{
    SiteConfigPayload, SiteConfigResponse, CONFIG_COLLECTION, CONFIG_DOC_ID,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::images::{process_image, UploadedFile};
use super::uploads::delete_blobs_best_effort;
use crate::error::AppError;
use crate::models::SiteConfig;
use crate::store::{BlobStore, DocumentStore};

struct CachedConfig {
    fetched_at: Instant,
    config: SiteConfig,
}

/// Reads of the config singleton go through an explicit TTL cache; a stale
/// entry triggers a refetch on access. This polling-on-read replaces the
/// vendor's live-update subscription.
#[derive(Clone)]
pub struct SiteConfigService {
    docs: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    cache: Arc<RwLock<Option<CachedConfig>>>,
    ttl: Duration,
}

impl SiteConfigService {
    pub fn new(docs: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>, ttl: Duration) -> Self {
        Self {
            docs,
            blobs,
            cache: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub async fn get_config(&self) -> Result<SiteConfigResponse, AppError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return Ok(cached.config.to_response());
                }
            }
        }

        let config = self.fetch().await?;
        let response = config.to_response();
        *self.cache.write().await = Some(CachedConfig {
            fetched_at: Instant::now(),
            config,
        });
        Ok(response)
    }

    pub async fn update_config(
        &self,
        payload: SiteConfigPayload,
        logo: Option<UploadedFile>,
        banner: Option<UploadedFile>,
    ) -> Result<SiteConfigResponse, AppError> {
        payload.validate()?;
        let current = self.fetch().await?;

        let logo_url = self
            .replace_image("logo", &current.logo_url, logo)
            .await?
            .unwrap_or(current.logo_url.clone());
        let banner_url = self
            .replace_image("banner", &current.banner_url, banner)
            .await?
            .unwrap_or(current.banner_url.clone());

        let config = SiteConfig::from_payload(&payload, logo_url, banner_url);
        let doc = self
            .docs
            .set(
                CONFIG_COLLECTION,
                CONFIG_DOC_ID,
                Utc::now(),
                config.to_fields(),
            )
            .await?;

        let stored = SiteConfig::from_document(&doc);
        let response = stored.to_response();
        // Write through so the next read sees the update immediately.
        *self.cache.write().await = Some(CachedConfig {
            fetched_at: Instant::now(),
            config: stored,
        });

        info!("site configuration updated");
        Ok(response)
    }

    async fn fetch(&self) -> Result<SiteConfig, AppError> {
        Ok(self
            .docs
            .get(CONFIG_COLLECTION, CONFIG_DOC_ID)
            .await?
            .map(|doc| SiteConfig::from_document(&doc))
            .unwrap_or_default())
    }

    /// Upload a replacement image and drop the old blob best-effort.
    /// Returns `None` when no replacement was supplied.
    async fn replace_image(
        &self,
        kind: &str,
        old_url: &str,
        replacement: Option<UploadedFile>,
    ) -> Result<Option<String>, AppError> {
        let Some(file) = replacement else {
            return Ok(None);
        };
        let processed = process_image(&file)
            .map_err(|err| AppError::Validation(format!("{} image rejected: {}", kind, err)))?;
        let path = format!("{}/{}-{}.jpg", CONFIG_COLLECTION, kind, Uuid::new_v4());
        let url = self
            .blobs
            .put(&path, processed.bytes, processed.content_type)
            .await?;
        if !old_url.is_empty() {
            delete_blobs_best_effort(self.blobs.as_ref(), &[old_url.to_string()]).await;
        }
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::images::tests::png_file;
    use crate::store::{MemoryBlobStore, MemoryDocumentStore};

    fn setup(ttl: Duration) -> (SiteConfigService, Arc<MemoryDocumentStore>, Arc<MemoryBlobStore>) {
        let docs = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobStore::default());
        let service = SiteConfigService::new(docs.clone(), blobs.clone(), ttl);
        (service, docs, blobs)
    }

    fn payload(name: &str) -> SiteConfigPayload {
        SiteConfigPayload {
            site_name: name.to_string(),
            slogan: "Masini verificate".to_string(),
            secondary_slogan: String::new(),
            location: "Cluj".to_string(),
            phone: "0700 000 000".to_string(),
            facebook_url: String::new(),
            seo_title: String::new(),
            seo_description: String::new(),
            seo_keywords: String::new(),
        }
    }

    #[tokio::test]
    async fn missing_singleton_reads_as_fully_defaulted() {
        let (service, _, _) = setup(Duration::from_secs(60));
        let config = service.get_config().await.unwrap();
        assert_eq!(config.site_name, "");
        assert_eq!(config.logo_url, "");
    }

    #[tokio::test]
    async fn reads_are_served_from_cache_within_the_ttl() {
        let (service, docs, _) = setup(Duration::from_secs(60));
        let first = service.get_config().await.unwrap();
        assert_eq!(first.site_name, "");

        // Behind-the-scenes change is invisible until the TTL lapses.
        docs.set(
            CONFIG_COLLECTION,
            CONFIG_DOC_ID,
            Utc::now(),
            serde_json::json!({ "site_name": "AutoNord" }),
        )
        .await
        .unwrap();
        let cached = service.get_config().await.unwrap();
        assert_eq!(cached.site_name, "");
    }

    #[tokio::test]
    async fn a_zero_ttl_always_refetches() {
        let (service, docs, _) = setup(Duration::ZERO);
        service.get_config().await.unwrap();
        docs.set(
            CONFIG_COLLECTION,
            CONFIG_DOC_ID,
            Utc::now(),
            serde_json::json!({ "site_name": "AutoNord" }),
        )
        .await
        .unwrap();
        assert_eq!(service.get_config().await.unwrap().site_name, "AutoNord");
    }

    #[tokio::test]
    async fn update_writes_through_the_cache() {
        let (service, _, _) = setup(Duration::from_secs(3600));
        service.get_config().await.unwrap();
        service
            .update_config(payload("AutoNord"), None, None)
            .await
            .unwrap();
        assert_eq!(service.get_config().await.unwrap().site_name, "AutoNord");
    }

    #[tokio::test]
    async fn replacing_the_logo_uploads_and_drops_the_old_blob() {
        let (service, _, blobs) = setup(Duration::ZERO);
        let first = service
            .update_config(payload("AutoNord"), Some(png_file("logo.png", 32, 32)), None)
            .await
            .unwrap();
        assert!(first.logo_url.starts_with("https://blobs.test/config/logo-"));

        let second = service
            .update_config(payload("AutoNord"), Some(png_file("logo2.png", 32, 32)), None)
            .await
            .unwrap();
        assert_ne!(second.logo_url, first.logo_url);
        assert!(!blobs.contains(&first.logo_url));
        assert!(blobs.contains(&second.logo_url));
    }

    #[tokio::test]
    async fn a_broken_replacement_image_is_rejected() {
        let (service, _, _) = setup(Duration::ZERO);
        let err = service
            .update_config(
                payload("AutoNord"),
                Some(UploadedFile {
                    filename: "logo.txt".to_string(),
                    bytes: b"nope".to_vec(),
                }),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
