use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use devconnector::api;
use devconnector::config::Config;
use devconnector::database::{DocumentStore, MongoDB};
use devconnector::middleware::SecurityHeaders;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting DevConnector API...");

    // Initialize MongoDB connection
    let db = MongoDB::new(&config.database_url).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?;
    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn DocumentStore> = Arc::new(db);
    let store_data: web::Data<dyn DocumentStore> = web::Data::from(store);
    let config_data = web::Data::new(config.clone());
    let http_client = web::Data::new(reqwest::Client::new());

    let host = config.host.clone();
    let port = config.port;

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI document at: http://{}:{}/api-docs/openapi.json", host, port);

    HttpServer::new(move || {
        let cors = config_data
            .cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::HeaderName::from_static("x-auth-token"),
            ])
            .expose_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(config_data.clone())
            .app_data(store_data.clone())
            .app_data(http_client.clone())
            .wrap(cors)
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
