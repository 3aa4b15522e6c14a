use actix_web::web;

use crate::{error::json_error_handler, middleware::auth::AuthMiddleware};

pub mod generate;
pub mod health;
pub mod itinerary;

/// Registers every route. Shared state (repository and completion client)
/// is expected as app data.
pub fn configure(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(|| async { "OK" }))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Protected routes
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware::new(jwt_secret))
                        .route(
                            "/ai/generate-itinerary",
                            web::post().to(generate::generate_itinerary),
                        )
                        .route("/itineraries", web::get().to(itinerary::list))
                        .route("/itineraries", web::post().to(itinerary::create))
                        .route("/itineraries/{id}", web::get().to(itinerary::get_by_id))
                        .route("/itineraries/{id}", web::delete().to(itinerary::delete)),
                ),
        );
}
