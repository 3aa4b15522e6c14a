use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::CompletionConfig;
use crate::models::trip::TripRequest;

const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("AI API error: {0}")]
    Status(u16),
    #[error("Invalid AI API response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct CompletionClient {
    http_client: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| CompletionError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Confirms the completion endpoint answers at all.
    ///
    /// Any HTTP status counts as reachable; only transport failures such as
    /// DNS, connection or timeout errors are reported.
    pub async fn check_reachable(&self) -> Result<(), CompletionError> {
        self.http_client
            .head(&self.config.api_url)
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| CompletionError::Request(e.to_string()))
    }

    /// Sends `prompt` as a single user message and returns the text of the
    /// first choice, or an empty string when the response carries none.
    ///
    /// One attempt only; callers surface any error as a failed generation.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        info!("Requesting completion from {}", self.config.api_url);

        let response = self
            .http_client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("AI API returned {}: {}", status, body);
            return Err(CompletionError::Status(status));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}

/// Planner prompt for `trip`, asking for the itinerary document as raw JSON.
pub fn build_prompt(trip: &TripRequest, duration: u32) -> String {
    let mut details = vec![
        format!("- Destination: {}", trip.destination),
        format!(
            "- Duration: {} days ({} to {})",
            duration, trip.start_date, trip.end_date
        ),
        format!("- Number of people: {}", trip.number_of_people),
        format!("- Budget level: {}", trip.budget_level),
        format!("- Travel style: {}", trip.travel_style.join(", ")),
        format!(
            "- Accommodation preferences: {}",
            trip.accommodation_prefs.join(", ")
        ),
    ];
    if let Some(dietary) = trip.dietary_restrictions.as_deref().filter(|s| !s.is_empty()) {
        details.push(format!("- Dietary restrictions: {}", dietary));
    }
    if let Some(access) = trip.accessibility_needs.as_deref().filter(|s| !s.is_empty()) {
        details.push(format!("- Accessibility needs: {}", access));
    }

    format!(
        r#"You are an expert travel planner. Create a detailed {duration}-day itinerary for {destination} for {people} people.

Travel Details:
{details}

Please provide a comprehensive day-by-day itinerary including:
1. A brief summary of the trip
2. For each day, provide 3-6 activities with:
   - Time slots (e.g., "9:00 AM - 11:00 AM")
   - Activity title and description
   - Type (Sightseeing, Restaurant, Museum, etc.)
   - Estimated cost per person in USD
   - Transportation suggestions
3. Total estimated cost for the entire trip

Format your response as valid JSON with this structure:
{{
  "summary": "Brief trip overview",
  "totalEstimatedCost": number,
  "days": [
    {{
      "day": 1,
      "date": "YYYY-MM-DD",
      "title": "Day title",
      "activities": [
        {{
          "time": "9:00 AM - 11:00 AM",
          "title": "Activity name",
          "description": "Activity description",
          "type": "Activity type",
          "estimatedCost": number,
          "transportation": "How to get there"
        }}
      ]
    }}
  ]
}}

Respond with raw JSON only. Do not include code blocks, markdown, or any other formatting."#,
        duration = duration,
        destination = trip.destination,
        people = trip.number_of_people,
        details = details.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::BudgetLevel;
    use chrono::NaiveDate;

    fn trip() -> TripRequest {
        TripRequest {
            destination: "Kyoto".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(),
            number_of_people: 2,
            budget_level: BudgetLevel::Budget,
            travel_style: vec!["Cultural".to_string(), "Relaxed".to_string()],
            accommodation_prefs: vec!["Ryokan".to_string()],
            dietary_restrictions: Some("Vegan".to_string()),
            accessibility_needs: None,
        }
    }

    fn config(url: String) -> CompletionConfig {
        CompletionConfig {
            api_url: url,
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_prompt_lists_trip_details() {
        let prompt = build_prompt(&trip(), 3);

        assert!(prompt.contains("Create a detailed 3-day itinerary for Kyoto for 2 people."));
        assert!(prompt.contains("- Duration: 3 days (2025-04-01 to 2025-04-04)"));
        assert!(prompt.contains("- Budget level: Budget"));
        assert!(prompt.contains("- Travel style: Cultural, Relaxed"));
        assert!(prompt.contains("- Dietary restrictions: Vegan"));
        assert!(!prompt.contains("Accessibility needs"));
        assert!(prompt.contains("\"totalEstimatedCost\": number"));
    }

    #[actix_rt::test]
    async fn test_complete_returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "response_format": { "type": "json_object" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"{\"summary\":\"ok\"}"}}]}"#)
            .create_async()
            .await;

        let client =
            CompletionClient::new(config(format!("{}/v1/chat/completions", server.url()))).unwrap();
        let content = client.complete("plan a trip").await.unwrap();

        assert_eq!(content, r#"{"summary":"ok"}"#);
        mock.assert_async().await;
    }

    #[actix_rt::test]
    async fn test_complete_without_choices_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = CompletionClient::new(config(server.url())).unwrap();
        assert_eq!(client.complete("x").await.unwrap(), "");
    }

    #[actix_rt::test]
    async fn test_complete_fails_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = CompletionClient::new(config(server.url())).unwrap();
        let err = client.complete("x").await.unwrap_err();
        assert!(matches!(err, CompletionError::Status(503)));
    }

    #[actix_rt::test]
    async fn test_complete_fails_on_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let client = CompletionClient::new(config(server.url())).unwrap();
        let err = client.complete("x").await.unwrap_err();
        assert!(matches!(err, CompletionError::InvalidResponse(_)));
    }

    #[actix_rt::test]
    async fn test_reachable_endpoint_passes_check() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("HEAD", "/")
            .with_status(405)
            .create_async()
            .await;

        let client = CompletionClient::new(config(server.url())).unwrap();
        assert!(client.check_reachable().await.is_ok());
        mock.assert_async().await;
    }

    #[actix_rt::test]
    async fn test_unreachable_endpoint_fails_check() {
        let client = CompletionClient::new(config("http://127.0.0.1:9".to_string())).unwrap();
        let err = client.check_reachable().await.unwrap_err();
        assert!(matches!(err, CompletionError::Request(_)));
    }
}
