use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest group the planner form accepts.
pub const MAX_PEOPLE: u32 = 20;
/// Longest trip, in days, that can be planned in one request.
pub const MAX_TRIP_DAYS: i64 = 30;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    #[serde(rename = "Budget")]
    Budget,
    #[serde(rename = "Mid-Range")]
    MidRange,
    #[serde(rename = "Luxury")]
    Luxury,
}

impl BudgetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::Budget => "Budget",
            BudgetLevel::MidRange => "Mid-Range",
            BudgetLevel::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trip parameters submitted from the planner form.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub number_of_people: u32,
    pub budget_level: BudgetLevel,
    #[serde(default)]
    pub travel_style: Vec<String>,
    #[serde(default)]
    pub accommodation_prefs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_needs: Option<String>,
}

impl TripRequest {
    /// Number of calendar days between the start and end dates.
    ///
    /// Dates carry no time of day, so the difference is already a whole
    /// number of days. May be zero or negative for an unvalidated request.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Returns the message of the first rule the request breaks.
    pub fn validate(&self) -> Result<(), String> {
        if self.destination.trim().is_empty() {
            return Err("Destination is required".to_string());
        }
        if self.number_of_people < 1 {
            return Err("Number of people must be at least 1".to_string());
        }
        if self.number_of_people > MAX_PEOPLE {
            return Err(format!("Number of people cannot exceed {}", MAX_PEOPLE));
        }
        if self.end_date <= self.start_date {
            return Err("End date must be after start date".to_string());
        }
        if self.duration_days() > MAX_TRIP_DAYS {
            return Err(format!("Trip cannot be longer than {} days", MAX_TRIP_DAYS));
        }
        Ok(())
    }
}
