use actix_cors::Cors;
use actix_web::{web, App, HttpServer, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use config::AppConfig;
use error::AppError;
use middleware::AdminAuth;
use services::{BrandService, CarService, RentalService, SiteConfigService};
use store::{BlobStore, DocumentStore, RestBlobStore, RestDocumentStore};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting Showroom Platform Backend on {}:{}",
        config.host, config.port
    );

    // Thin clients for the hosted document database and object storage.
    let http = reqwest::Client::new();
    let docs: Arc<dyn DocumentStore> = Arc::new(RestDocumentStore::new(
        http.clone(),
        &config.document_api_url,
        &config.document_api_key,
    ));
    let blobs: Arc<dyn BlobStore> = Arc::new(RestBlobStore::new(
        http,
        &config.storage_api_url,
        &config.storage_public_url,
        &config.document_api_key,
    ));

    // Initialize services
    let car_service = CarService::new(docs.clone(), blobs.clone());
    let rental_service = RentalService::new(docs.clone(), blobs.clone());
    let brand_service = BrandService::new(docs.clone());
    let config_service = SiteConfigService::new(
        docs.clone(),
        blobs.clone(),
        Duration::from_secs(config.config_cache_ttl_secs),
    );
    let admin_token = config.admin_api_token.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(car_service.clone()))
            .app_data(web::Data::new(rental_service.clone()))
            .app_data(web::Data::new(brand_service.clone()))
            .app_data(web::Data::new(config_service.clone()))
            .service(
                web::scope("/api/v1")
                    .service(handlers::health::health_check)
                    .service(
                        web::scope("/cars")
                            // Public endpoints
                            .route("", web::get().to(handlers::cars::list_cars))
                            .route("/search", web::get().to(handlers::cars::search_cars))
                            .route("/{id}", web::get().to(handlers::cars::get_car))
                            // Admin endpoints
                            .service(
                                web::scope("")
                                    .wrap(AdminAuth::new(admin_token.clone()))
                                    .route("", web::post().to(handlers::cars::create_car))
                                    .route("/{id}", web::put().to(handlers::cars::update_car))
                                    .route("/{id}", web::delete().to(handlers::cars::delete_car)),
                            ),
                    )
                    .service(
                        web::scope("/rentals")
                            // Public endpoints
                            .route("", web::get().to(handlers::rentals::list_rentals))
                            .route("/search", web::get().to(handlers::rentals::search_rentals))
                            .route("/{id}", web::get().to(handlers::rentals::get_rental))
                            // Admin endpoints
                            .service(
                                web::scope("")
                                    .wrap(AdminAuth::new(admin_token.clone()))
                                    .route("", web::post().to(handlers::rentals::create_rental))
                                    .route("/{id}", web::put().to(handlers::rentals::update_rental))
                                    .route(
                                        "/{id}",
                                        web::delete().to(handlers::rentals::delete_rental),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/brands")
                            .route("", web::get().to(handlers::brands::list_brands))
                            .service(
                                web::scope("")
                                    .wrap(AdminAuth::new(admin_token.clone()))
                                    .route("", web::post().to(handlers::brands::create_brand))
                                    .route(
                                        "/{id}",
                                        web::delete().to(handlers::brands::delete_brand),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/config")
                            .route("", web::get().to(handlers::site_config::get_config))
                            .service(
                                web::scope("")
                                    .wrap(AdminAuth::new(admin_token.clone()))
                                    .route(
                                        "",
                                        web::put().to(handlers::site_config::update_config),
                                    ),
                            ),
                    ),
            )
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await
    .map_err(AppError::from)
}
