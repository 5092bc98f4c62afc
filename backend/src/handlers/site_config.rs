use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};
use showroom_platform_shared::SiteConfigPayload;

use super::read_form;
use crate::error::AppError;
use crate::services::SiteConfigService;

pub async fn get_config(service: web::Data<SiteConfigService>) -> Result<HttpResponse, AppError> {
    let config = service.get_config().await?;
    Ok(HttpResponse::Ok().json(config))
}

pub async fn update_config(
    payload: Multipart,
    service: web::Data<SiteConfigService>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_form(payload).await?;
    let data: SiteConfigPayload = form.parse_data()?;
    let logo = form.take_file("logo");
    let banner = form.take_file("banner");

    let config = service.update_config(data, logo, banner).await?;
    Ok(HttpResponse::Ok().json(config))
}
