mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::database::{MongoDB, Store};
use crate::middleware::{AuthGate, RequestMetrics};
use crate::services::auth_service::TokenKeys;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env().map_err(|e| {
        log::error!("❌ {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Research Center API...");
    log::info!("📊 Database: {}", settings.redacted_database_url());

    let db = MongoDB::connect(&settings.database_url, &settings.database_name)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
        })?;
    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn Store> = Arc::new(db.clone());
    let store_data = web::Data::from(store);
    let keys = web::Data::new(TokenKeys::from_settings(&settings));
    let auth = AuthGate::new(settings.auth_legacy_status);

    if settings.auth_legacy_status {
        log::warn!("⚠️ AUTH_LEGACY_STATUS is on: rejected tokens are answered with 200");
    }

    log::info!("🌐 Server starting on {}:{}", settings.host, settings.port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        settings.host, settings.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(keys.clone())
            .wrap(cors)
            .wrap(RequestMetrics)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(|cfg| api::configure(cfg, auth))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing MongoDB connection");
    db.shutdown().await;

    Ok(())
}
