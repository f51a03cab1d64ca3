mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;
mod validation;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, StorageBackend};
use crate::database::{MemoryStore, MongoDB, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting DevConnector service...");

    let store: Arc<dyn Store> = match config.storage {
        StorageBackend::MongoDB => {
            let url = config.database_url.as_deref().unwrap_or_default();
            log::info!("📊 Database: {}", url);
            let db = MongoDB::new(url).await.map_err(|e| {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
            })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db) as Arc<dyn Store>
        }
        StorageBackend::Memory => {
            log::warn!("⚠️  Using in-memory storage, data is lost on restart");
            Arc::new(MemoryStore::new()) as Arc<dyn Store>
        }
    };

    let db_data: web::Data<dyn Store> = web::Data::from(store);
    let auth_data = web::Data::new(config.auth.clone());
    let origins = config.cors_origins.clone();
    let bind_address = config.bind_address();

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(auth_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
