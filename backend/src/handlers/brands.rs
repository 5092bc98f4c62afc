use actix_web::{web, HttpResponse, Result};
use showroom_platform_shared::BrandPayload;

use crate::error::AppError;
use crate::services::BrandService;

pub async fn list_brands(service: web::Data<BrandService>) -> Result<HttpResponse, AppError> {
    let brands = service.list_brands().await?;
    Ok(HttpResponse::Ok().json(brands))
}

pub async fn create_brand(
    payload: web::Json<BrandPayload>,
    service: web::Data<BrandService>,
) -> Result<HttpResponse, AppError> {
    let brand = service.add_brand(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(brand))
}

pub async fn delete_brand(
    path: web::Path<String>,
    service: web::Data<BrandService>,
) -> Result<HttpResponse, AppError> {
    service.delete_brand(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}
