//! Turns a raw chat-completion into an [`Itinerary`].
//!
//! The model is asked for raw JSON but regularly wraps it in a Markdown code
//! fence, drops fields, or answers in prose. Any JSON object with usable
//! `days` is returned exactly as parsed; anything else is replaced by a
//! template itinerary built from the trip parameters alone, so the caller
//! always gets a usable plan.

use chrono::Duration;
use log::warn;
use regex::Regex;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::models::itinerary::{Activity, DayPlan, Itinerary, ItineraryDocument, ItineraryOutline};
use crate::models::trip::TripRequest;

const FALLBACK_DAILY_COST_PER_PERSON: f64 = 150.0;
const DATE_FORMAT: &str = "%Y-%m-%d";

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```(?:json)?\n?").expect("fence pattern is valid"))
}

/// Number of itinerary days for `trip`, never less than one.
pub fn trip_duration(trip: &TripRequest) -> u32 {
    trip.duration_days().clamp(1, u32::MAX as i64) as u32
}

/// Removes Markdown code-fence markers and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    fence_pattern().replace_all(raw, "").trim().to_string()
}

/// Parses `raw` as an itinerary document, or explains why it could not.
///
/// The document must be a JSON object whose `days`, when present, pass
/// [`ItineraryOutline`]. The parsed value itself is returned untouched.
pub fn parse_completion(raw: &str) -> Result<Value, serde_json::Error> {
    let document: Value = serde_json::from_str(&strip_code_fences(raw))?;
    if !document.is_object() {
        return Err(serde_json::Error::custom("itinerary is not a JSON object"));
    }
    ItineraryOutline::deserialize(&document)?;
    Ok(document)
}

/// Produces the itinerary for `trip` from the model's `completion` text.
///
/// Never fails: unusable text yields [`fallback_itinerary`].
pub fn normalize(trip: &TripRequest, completion: &str) -> Itinerary {
    let duration = trip_duration(trip);

    match parse_completion(completion) {
        Ok(document) => {
            let days = document
                .get("days")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            if days != duration as usize {
                warn!(
                    "Completion for {} has {} days, expected {}",
                    trip.destination, days, duration
                );
            }
            Itinerary::Generated(document)
        }
        Err(err) => {
            warn!("Error parsing AI response: {}", err);
            warn!("AI response content: {:?}", completion);
            Itinerary::Fallback(fallback_itinerary(trip, duration))
        }
    }
}

/// Template itinerary with three fixed activities per day.
pub fn fallback_itinerary(trip: &TripRequest, duration: u32) -> ItineraryDocument {
    let destination = &trip.destination;

    let days = (0..duration)
        .map(|offset| DayPlan {
            day: offset + 1,
            date: (trip.start_date + Duration::days(offset as i64))
                .format(DATE_FORMAT)
                .to_string(),
            title: format!("Day {} in {}", offset + 1, destination),
            activities: fallback_activities(destination),
        })
        .collect();

    ItineraryDocument {
        summary: format!("A wonderful {}-day adventure in {}", duration, destination),
        total_estimated_cost: duration as f64
            * FALLBACK_DAILY_COST_PER_PERSON
            * trip.number_of_people as f64,
        days,
    }
}

fn fallback_activities(destination: &str) -> Vec<Activity> {
    vec![
        Activity::new(
            "9:00 AM - 12:00 PM",
            "Morning Exploration",
            format!("Explore the highlights of {}", destination),
            "Sightseeing",
            30.0,
            "Walking or local transport",
        ),
        Activity::new(
            "12:00 PM - 2:00 PM",
            "Local Lunch",
            "Enjoy authentic local cuisine".to_string(),
            "Restaurant",
            25.0,
            "Short walk",
        ),
        Activity::new(
            "3:00 PM - 6:00 PM",
            "Afternoon Activity",
            "Continue discovering local attractions".to_string(),
            "Sightseeing",
            40.0,
            "Public transport",
        ),
    ]
}
