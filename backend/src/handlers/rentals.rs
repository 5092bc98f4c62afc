use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};
use showroom_platform_shared::RentalPayload;
use tracing::debug;

use super::{read_form, PageParams, SearchParams};
use crate::error::AppError;
use crate::services::RentalService;

pub async fn list_rentals(
    query: web::Query<PageParams>,
    service: web::Data<RentalService>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_rentals(query.limit(), query.cursor()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn search_rentals(
    query: web::Query<SearchParams>,
    service: web::Data<RentalService>,
) -> Result<HttpResponse, AppError> {
    let result = service
        .search_rentals(query.filter(), query.page_size(), query.pages())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn get_rental(
    path: web::Path<String>,
    service: web::Data<RentalService>,
) -> Result<HttpResponse, AppError> {
    let rental = service.get_rental(&path).await?;
    Ok(HttpResponse::Ok().json(rental))
}

pub async fn create_rental(
    payload: Multipart,
    service: web::Data<RentalService>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_form(payload).await?;
    let data: RentalPayload = form.parse_data()?;
    let files = form.take_files("images");

    debug!("creating rental listing '{}' with {} files", data.title, files.len());
    let rental = service.create_rental(data, files).await?;
    Ok(HttpResponse::Created().json(rental))
}

pub async fn update_rental(
    path: web::Path<String>,
    payload: Multipart,
    service: web::Data<RentalService>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_form(payload).await?;
    let data: RentalPayload = form.parse_data()?;
    let files = form.take_files("images");

    let rental = service.update_rental(&path, data, files).await?;
    Ok(HttpResponse::Ok().json(rental))
}

pub async fn delete_rental(
    path: web::Path<String>,
    service: web::Data<RentalService>,
) -> Result<HttpResponse, AppError> {
    service.delete_rental(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}
