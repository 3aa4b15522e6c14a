#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::Duration;
use mongodb::bson::oid::ObjectId;
use std::sync::{Arc, Mutex};

use trip_planner_api::{
    config::CompletionConfig,
    middleware::auth::issue_token,
    models::saved_itinerary::{ItinerarySummary, SavedItinerary},
    routes,
    services::{
        completion_service::CompletionClient,
        itinerary_service::{ItineraryRepository, RepositoryError},
    },
};

pub const JWT_SECRET: &str = "test_secret";

/// Repository backed by a vector, standing in for MongoDB.
#[derive(Default)]
pub struct InMemoryRepository {
    records: Mutex<Vec<SavedItinerary>>,
    unavailable: bool,
}

impl InMemoryRepository {
    pub fn unavailable() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    pub fn seed(&self, record: SavedItinerary) -> ObjectId {
        let id = record.id.unwrap_or_else(ObjectId::new);
        let mut record = record;
        record.id = Some(id);
        self.records.lock().unwrap().push(record);
        id
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            return Err(RepositoryError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ItineraryRepository for InMemoryRepository {
    async fn insert(&self, mut record: SavedItinerary) -> Result<SavedItinerary, RepositoryError> {
        self.check()?;
        record.id = Some(ObjectId::new());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_for_user(
        &self,
        user_id: &ObjectId,
    ) -> Result<Vec<ItinerarySummary>, RepositoryError> {
        self.check()?;
        let records = self.records.lock().unwrap();
        let mut owned: Vec<&SavedItinerary> =
            records.iter().filter(|r| &r.user_id == user_id).collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned.into_iter().map(summary_of).collect())
    }

    async fn find_for_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<Option<SavedItinerary>, RepositoryError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id.as_ref() == Some(id) && &r.user_id == user_id)
            .cloned())
    }

    async fn delete_for_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.id.as_ref() == Some(id) && &r.user_id == user_id));
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check()
    }
}

// Stored records always carry the id assigned by `insert` or `seed`
fn summary_of(record: &SavedItinerary) -> ItinerarySummary {
    ItinerarySummary {
        id: record.id.expect("stored record has an id"),
        title: record.title.clone(),
        destination: record.destination.clone(),
        start_date: record.start_date,
        end_date: record.end_date,
        number_of_people: record.number_of_people,
        budget_level: record.budget_level,
        total_estimated_cost: record.total_estimated_cost,
        created_at: record.created_at,
    }
}

pub struct TestApp {
    pub repository: Arc<InMemoryRepository>,
    pub completion_url: String,
}

impl TestApp {
    pub fn new(completion_url: &str) -> Self {
        Self::with_repository(InMemoryRepository::default(), completion_url)
    }

    pub fn with_repository(repository: InMemoryRepository, completion_url: &str) -> Self {
        Self {
            repository: Arc::new(repository),
            completion_url: completion_url.to_string(),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let repository: Arc<dyn ItineraryRepository> = self.repository.clone();
        let completion = CompletionClient::new(CompletionConfig {
            api_url: self.completion_url.clone(),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            timeout_secs: Some(5),
        })
        .unwrap();

        App::new()
            .app_data(web::Data::from(repository))
            .app_data(web::Data::new(completion))
            .configure(|cfg| routes::configure(cfg, JWT_SECRET))
    }
}

pub fn token_for(user_id: &ObjectId) -> String {
    issue_token(
        JWT_SECRET,
        "traveler@example.com",
        &user_id.to_hex(),
        Duration::hours(1),
    )
    .unwrap()
}

pub fn bearer(user_id: &ObjectId) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}

pub fn paris_trip() -> serde_json::Value {
    serde_json::json!({
        "destination": "Paris, France",
        "startDate": "2025-08-15",
        "endDate": "2025-08-22",
        "numberOfPeople": 2,
        "budgetLevel": "Mid-Range",
        "travelStyle": ["Cultural", "Foodie"],
        "accommodationPrefs": ["Boutique Hotel"]
    })
}
