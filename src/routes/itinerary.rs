use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::saved_itinerary::{
        CreateItineraryRequest, ItineraryResponse, ItinerarySummaryResponse,
    },
    services::itinerary_service::ItineraryRepository,
};

// Malformed ids can't match any record, so they read as "not found".
fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::NotFound)
}

/*
    GET /api/itineraries
*/
pub async fn list(
    user: AuthenticatedUser,
    repo: web::Data<dyn ItineraryRepository>,
) -> Result<HttpResponse, ApiError> {
    let summaries: Vec<ItinerarySummaryResponse> = repo
        .list_for_user(&user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/*
    POST /api/itineraries
*/
pub async fn create(
    user: AuthenticatedUser,
    repo: web::Data<dyn ItineraryRepository>,
    input: web::Json<CreateItineraryRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();
    input.validate().map_err(ApiError::BadRequest)?;

    let record = repo
        .insert(input.into_record(user.user_id, Utc::now()))
        .await?;
    info!(
        "Saved itinerary {:?} for user {}",
        record.id, user.email
    );

    Ok(HttpResponse::Ok().json(ItineraryResponse::from(record)))
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(
    user: AuthenticatedUser,
    repo: web::Data<dyn ItineraryRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path.into_inner())?;

    match repo.find_for_user(&id, &user.user_id).await? {
        Some(record) => Ok(HttpResponse::Ok().json(ItineraryResponse::from(record))),
        None => Err(ApiError::NotFound),
    }
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete(
    user: AuthenticatedUser,
    repo: web::Data<dyn ItineraryRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path.into_inner())?;

    if !repo.delete_for_user(&id, &user.user_id).await? {
        return Err(ApiError::NotFound);
    }
    info!("Deleted itinerary {} for user {}", id, user.email);

    Ok(HttpResponse::Ok().json(json!({ "message": "Itinerary deleted successfully" })))
}
