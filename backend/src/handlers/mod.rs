pub mod brands;
pub mod cars;
pub mod health;
pub mod rentals;
pub mod site_config;

use actix_multipart::Multipart;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use showroom_platform_shared::{
    ListingCursor, PriceSort, DEFAULT_PAGE_SIZE, MAX_SEARCH_PAGES, MAX_UPLOAD_BYTES,
};
use validator::Validate;

use crate::error::AppError;
use crate::services::{ListingFilter, UploadedFile};

/// Cursor-paged listing query shared by the car and rental endpoints.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub after_created_at: Option<DateTime<Utc>>,
    pub after_id: Option<String>,
}

impl PageParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn cursor(&self) -> Option<ListingCursor> {
        match (self.after_created_at, &self.after_id) {
            (Some(created_at), Some(id)) => Some(ListingCursor {
                created_at,
                id: id.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<PriceSort>,
    pub page_size: Option<usize>,
    pub pages: Option<usize>,
}

impl SearchParams {
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            brand_query: self.brand.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn pages(&self) -> usize {
        self.pages.unwrap_or(MAX_SEARCH_PAGES).clamp(1, MAX_SEARCH_PAGES)
    }
}

/// A listing/config form as it arrives over multipart: one JSON `data`
/// field plus zero or more named file fields.
pub struct SubmittedForm {
    data: Option<String>,
    files: Vec<(String, UploadedFile)>,
}

impl SubmittedForm {
    pub fn parse_data<T>(&self) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let raw = self
            .data
            .as_deref()
            .ok_or_else(|| AppError::Validation("Missing 'data' form field".to_string()))?;
        let payload: T = serde_json::from_str(raw)?;
        payload.validate()?;
        Ok(payload)
    }

    pub fn take_files(&mut self, field_name: &str) -> Vec<UploadedFile> {
        let (matching, rest) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|(name, _)| name == field_name);
        self.files = rest;
        matching.into_iter().map(|(_, file)| file).collect()
    }

    pub fn take_file(&mut self, field_name: &str) -> Option<UploadedFile> {
        self.take_files(field_name).into_iter().next()
    }
}

/// Drain a multipart request into memory, bounding every part by the
/// upload byte ceiling.
pub async fn read_form(mut payload: Multipart) -> Result<SubmittedForm, AppError> {
    let mut form = SubmittedForm {
        data: None,
        files: Vec::new(),
    };

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::Validation(format!("Malformed multipart request: {}", err)))?
    {
        let name = field.name().to_string();
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| AppError::Validation(format!("Broken upload stream: {}", err)))?
        {
            bytes.extend_from_slice(&chunk);
            if bytes.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::Validation(format!(
                    "Form part '{}' exceeds the {} byte limit",
                    name, MAX_UPLOAD_BYTES
                )));
            }
        }

        match filename {
            Some(filename) => form.files.push((name, UploadedFile { filename, bytes })),
            None if name == "data" => {
                form.data = Some(String::from_utf8(bytes).map_err(|_| {
                    AppError::Validation("'data' form field must be UTF-8".to_string())
                })?);
            }
            // Unknown scalar fields are ignored.
            None => {}
        }
    }

    Ok(form)
}
