use actix_web::{web, HttpResponse, Responder};
use log::warn;
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::services::{
    completion_service::CompletionClient, itinerary_service::ItineraryRepository,
};

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok() -> Self {
        ServiceStatus {
            status: "ok".to_string(),
            details: None,
        }
    }

    fn error(details: String) -> Self {
        ServiceStatus {
            status: "error".to_string(),
            details: Some(details),
        }
    }
}

/*
    GET /api/health
*/
pub async fn health_check(
    repo: web::Data<dyn ItineraryRepository>,
    completion: web::Data<CompletionClient>,
) -> impl Responder {
    let mut services = HashMap::new();

    let database = match repo.ping().await {
        Ok(()) => ServiceStatus::ok(),
        Err(err) => ServiceStatus::error(err.to_string()),
    };
    services.insert("database".to_string(), database);

    let completion_api = match completion.check_reachable().await {
        Ok(()) => ServiceStatus::ok(),
        Err(err) => {
            warn!("Completion API health check failed: {}", err);
            ServiceStatus::error(err.to_string())
        }
    };
    services.insert("completion_api".to_string(), completion_api);

    // Any failing service degrades the whole report
    let status = if services.values().all(|s| s.status == "ok") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
