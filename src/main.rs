use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use trip_planner_api::{
    config::AppConfig,
    db,
    routes,
    services::{
        completion_service::CompletionClient,
        itinerary_service::{ItineraryRepository, MongoItineraryRepository},
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let client = db::mongo::create_mongo_client(&config.mongo_uri)
        .await
        .map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;
    let repository: Arc<dyn ItineraryRepository> =
        Arc::new(MongoItineraryRepository::new(client, &config.database));
    let repository = web::Data::from(repository);

    let completion = CompletionClient::new(config.completion.clone()).map_err(|e| {
        error!("Failed to create completion client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;
    let completion = web::Data::new(completion);

    let jwt_secret = config.jwt_secret.clone();
    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(repository.clone())
            .app_data(completion.clone())
            .configure(|cfg| routes::configure(cfg, &jwt_secret))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
