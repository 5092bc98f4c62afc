use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};
use showroom_platform_shared::CarPayload;
use tracing::debug;

use super::{read_form, PageParams, SearchParams};
use crate::error::AppError;
use crate::services::CarService;

pub async fn list_cars(
    query: web::Query<PageParams>,
    service: web::Data<CarService>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_cars(query.limit(), query.cursor()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn search_cars(
    query: web::Query<SearchParams>,
    service: web::Data<CarService>,
) -> Result<HttpResponse, AppError> {
    let result = service
        .search_cars(query.filter(), query.page_size(), query.pages())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn get_car(
    path: web::Path<String>,
    service: web::Data<CarService>,
) -> Result<HttpResponse, AppError> {
    let car = service.get_car(&path).await?;
    Ok(HttpResponse::Ok().json(car))
}

pub async fn create_car(
    payload: Multipart,
    service: web::Data<CarService>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_form(payload).await?;
    let data: CarPayload = form.parse_data()?;
    let files = form.take_files("images");

    debug!("creating car listing '{}' with {} files", data.title, files.len());
    let car = service.create_car(data, files).await?;
    Ok(HttpResponse::Created().json(car))
}

pub async fn update_car(
    path: web::Path<String>,
    payload: Multipart,
    service: web::Data<CarService>,
) -> Result<HttpResponse, AppError> {
    let mut form = read_form(payload).await?;
    let data: CarPayload = form.parse_data()?;
    let files = form.take_files("images");

    let car = service.update_car(&path, data, files).await?;
    Ok(HttpResponse::Ok().json(car))
}

pub async fn delete_car(
    path: web::Path<String>,
    service: web::Data<CarService>,
) -> Result<HttpResponse, AppError> {
    service.delete_car(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}
