use actix_web::{web, HttpResponse};
use log::info;

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::trip::TripRequest,
    services::{
        completion_service::{build_prompt, CompletionClient},
        itinerary_normalizer::{normalize, trip_duration},
    },
};

/*
    POST /api/ai/generate-itinerary

    Only a failed call to the completion API is an error here. Whatever text
    comes back is turned into an itinerary by the normalizer.
*/
pub async fn generate_itinerary(
    user: AuthenticatedUser,
    completion: web::Data<CompletionClient>,
    input: web::Json<TripRequest>,
) -> Result<HttpResponse, ApiError> {
    let trip = input.into_inner();
    trip.validate().map_err(ApiError::BadRequest)?;

    let duration = trip_duration(&trip);
    info!(
        "Generating {}-day itinerary for {} ({})",
        duration, trip.destination, user.email
    );

    let prompt = build_prompt(&trip, duration);
    let raw = completion.complete(&prompt).await?;
    let itinerary = normalize(&trip, &raw);

    Ok(HttpResponse::Ok().json(itinerary))
}
