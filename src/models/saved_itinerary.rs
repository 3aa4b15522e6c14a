use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::trip::{BudgetLevel, TripRequest};

/// Body of `POST /api/itineraries`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateItineraryRequest {
    pub title: String,
    #[serde(flatten)]
    pub trip: TripRequest,
    #[serde(default)]
    pub ai_generated_plan: Option<Value>,
    #[serde(default)]
    pub total_estimated_cost: Option<f64>,
}

impl CreateItineraryRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        self.trip.validate()
    }

    /// Builds the stored record for `user_id`.
    ///
    /// The plan is kept verbatim. When the caller supplies no total, the
    /// plan's own `totalEstimatedCost` is used if it is a number.
    pub fn into_record(self, user_id: ObjectId, now: DateTime<Utc>) -> SavedItinerary {
        let plan = self
            .ai_generated_plan
            .filter(|plan| !plan.is_null())
            .unwrap_or_else(|| Value::Object(Default::default()));
        let total_estimated_cost = self
            .total_estimated_cost
            .or_else(|| plan.get("totalEstimatedCost").and_then(Value::as_f64));
        let trip = self.trip;

        SavedItinerary {
            id: None,
            user_id,
            title: self.title,
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            number_of_people: trip.number_of_people,
            budget_level: trip.budget_level,
            travel_style: trip.travel_style,
            accommodation_prefs: trip.accommodation_prefs,
            dietary_restrictions: trip.dietary_restrictions,
            accessibility_needs: trip.accessibility_needs,
            ai_generated_plan: plan,
            total_estimated_cost,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An itinerary as stored in the `Itineraries` collection.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavedItinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_people: u32,
    pub budget_level: BudgetLevel,
    pub travel_style: Vec<String>,
    pub accommodation_prefs: Vec<String>,
    pub dietary_restrictions: Option<String>,
    pub accessibility_needs: Option<String>,
    pub ai_generated_plan: Value,
    pub total_estimated_cost: Option<f64>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// List projection of a stored itinerary; the plan itself is not loaded.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_people: u32,
    pub budget_level: BudgetLevel,
    pub total_estimated_cost: Option<f64>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/*
    JSON shapes returned to the browser. Ids go out as hex strings and
    timestamps as RFC 3339 instead of the extended-JSON forms bson uses.
*/

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_people: u32,
    pub budget_level: BudgetLevel,
    pub travel_style: Vec<String>,
    pub accommodation_prefs: Vec<String>,
    pub dietary_restrictions: Option<String>,
    pub accessibility_needs: Option<String>,
    pub ai_generated_plan: Value,
    pub total_estimated_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SavedItinerary> for ItineraryResponse {
    fn from(record: SavedItinerary) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: record.user_id.to_hex(),
            title: record.title,
            destination: record.destination,
            start_date: record.start_date,
            end_date: record.end_date,
            number_of_people: record.number_of_people,
            budget_level: record.budget_level,
            travel_style: record.travel_style,
            accommodation_prefs: record.accommodation_prefs,
            dietary_restrictions: record.dietary_restrictions,
            accessibility_needs: record.accessibility_needs,
            ai_generated_plan: record.ai_generated_plan,
            total_estimated_cost: record.total_estimated_cost,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummaryResponse {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_people: u32,
    pub budget_level: BudgetLevel,
    pub total_estimated_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<ItinerarySummary> for ItinerarySummaryResponse {
    fn from(summary: ItinerarySummary) -> Self {
        Self {
            id: summary.id.to_hex(),
            title: summary.title,
            destination: summary.destination,
            start_date: summary.start_date,
            end_date: summary.end_date,
            number_of_people: summary.number_of_people,
            budget_level: summary.budget_level,
            total_estimated_cost: summary.total_estimated_cost,
            created_at: summary.created_at,
        }
    }
}
