use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use std::sync::Arc;
use thiserror::Error;

use crate::models::saved_itinerary::{ItinerarySummary, SavedItinerary};

const COLLECTION: &str = "Itineraries";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        RepositoryError::Database(err.to_string())
    }
}

/// Storage for saved itineraries. Every read and delete is scoped to the
/// owning user, so a record is invisible to anyone else.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// Stores `record` and returns it with its generated id.
    async fn insert(&self, record: SavedItinerary) -> Result<SavedItinerary, RepositoryError>;

    /// Summaries of the user's itineraries, newest first.
    async fn list_for_user(
        &self,
        user_id: &ObjectId,
    ) -> Result<Vec<ItinerarySummary>, RepositoryError>;

    async fn find_for_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<Option<SavedItinerary>, RepositoryError>;

    /// Returns false when no record with that id belongs to the user.
    async fn delete_for_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<bool, RepositoryError>;

    async fn ping(&self) -> Result<(), RepositoryError>;
}

pub struct MongoItineraryRepository {
    client: Arc<Client>,
    database: String,
}

impl MongoItineraryRepository {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        Self {
            client,
            database: database.to_string(),
        }
    }

    fn collection(&self) -> Collection<SavedItinerary> {
        self.client.database(&self.database).collection(COLLECTION)
    }
}

#[async_trait]
impl ItineraryRepository for MongoItineraryRepository {
    async fn insert(&self, mut record: SavedItinerary) -> Result<SavedItinerary, RepositoryError> {
        let result = self.collection().insert_one(&record).await?;
        record.id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn list_for_user(
        &self,
        user_id: &ObjectId,
    ) -> Result<Vec<ItinerarySummary>, RepositoryError> {
        let cursor = self
            .collection()
            .clone_with_type::<ItinerarySummary>()
            .find(doc! { "userId": *user_id })
            .sort(doc! { "createdAt": -1 })
            .projection(doc! {
                "title": 1,
                "destination": 1,
                "startDate": 1,
                "endDate": 1,
                "numberOfPeople": 1,
                "budgetLevel": 1,
                "totalEstimatedCost": 1,
                "createdAt": 1,
            })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_for_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<Option<SavedItinerary>, RepositoryError> {
        Ok(self
            .collection()
            .find_one(doc! { "_id": *id, "userId": *user_id })
            .await?)
    }

    async fn delete_for_user(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": *id, "userId": *user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
