use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The itinerary returned by `POST /api/ai/generate-itinerary`.
///
/// A document written by the model goes back to the client exactly as it
/// was parsed; only the template built from the trip parameters is typed.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Itinerary {
    Generated(Value),
    Fallback(ItineraryDocument),
}

impl Itinerary {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Itinerary::Fallback(_))
    }
}

/// Structural view of a model-written document.
///
/// Only the containers are checked: `days` must be a list of objects whose
/// `activities` are lists of objects. Scalar fields may hold any JSON value
/// and are never read.
#[derive(Debug, Deserialize)]
pub struct ItineraryOutline {
    #[serde(default)]
    pub days: Vec<DayOutline>,
}

#[derive(Debug, Deserialize)]
pub struct DayOutline {
    #[serde(default)]
    pub activities: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    pub summary: String,
    pub total_estimated_cost: f64,
    pub days: Vec<DayPlan>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub date: String,
    pub title: String,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: String,
    pub title: String,
    pub description: String,
    // Display category only ("Sightseeing", "Restaurant", ...)
    #[serde(rename = "type")]
    pub activity_type: String,
    pub estimated_cost: f64,
    pub transportation: String,
}

impl Activity {
    pub fn new(
        time: &str,
        title: &str,
        description: String,
        activity_type: &str,
        estimated_cost: f64,
        transportation: &str,
    ) -> Self {
        Self {
            time: time.to_string(),
            title: title.to_string(),
            description,
            activity_type: activity_type.to_string(),
            estimated_cost,
            transportation: transportation.to_string(),
        }
    }
}
