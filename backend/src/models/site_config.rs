use serde_json::{json, Value};
use showroom_platform_shared::{SiteConfigPayload, SiteConfigResponse};

use super::str_field;
use crate::store::Document;

/// The singleton site configuration document (`config/public`).
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
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

impl SiteConfig {
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;
        Self {
            site_name: str_field(fields, "site_name"),
            slogan: str_field(fields, "slogan"),
            secondary_slogan: str_field(fields, "secondary_slogan"),
            logo_url: str_field(fields, "logo_url"),
            banner_url: str_field(fields, "banner_url"),
            location: str_field(fields, "location"),
            phone: str_field(fields, "phone"),
            facebook_url: str_field(fields, "facebook_url"),
            seo_title: str_field(fields, "seo_title"),
            seo_description: str_field(fields, "seo_description"),
            seo_keywords: str_field(fields, "seo_keywords"),
        }
    }

    pub fn from_payload(payload: &SiteConfigPayload, logo_url: String, banner_url: String) -> Self {
        Self {
            site_name: payload.site_name.clone(),
            slogan: payload.slogan.clone(),
            secondary_slogan: payload.secondary_slogan.clone(),
            logo_url,
            banner_url,
            location: payload.location.clone(),
            phone: payload.phone.clone(),
            facebook_url: payload.facebook_url.clone(),
            seo_title: payload.seo_title.clone(),
            seo_description: payload.seo_description.clone(),
            seo_keywords: payload.seo_keywords.clone(),
        }
    }

    pub fn to_fields(&self) -> Value {
        json!({
            "site_name": self.site_name,
            "slogan": self.slogan,
            "secondary_slogan": self.secondary_slogan,
            "logo_url": self.logo_url,
            "banner_url": self.banner_url,
            "location": self.location,
            "phone": self.phone,
            "facebook_url": self.facebook_url,
            "seo_title": self.seo_title,
            "seo_description": self.seo_description,
            "seo_keywords": self.seo_keywords,
        })
    }

    pub fn to_response(&self) -> SiteConfigResponse {
        SiteConfigResponse {
            site_name: self.site_name.clone(),
            slogan: self.slogan.clone(),
            secondary_slogan: self.secondary_slogan.clone(),
            logo_url: self.logo_url.clone(),
            banner_url: self.banner_url.clone(),
            location: self.location.clone(),
            phone: self.phone.clone(),
            facebook_url: self.facebook_url.clone(),
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            seo_keywords: self.seo_keywords.clone(),
        }
    }
}
