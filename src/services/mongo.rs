use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};
use std::time::Duration;
use thiserror::Error;

use crate::core::filters::eligible_formats;
use crate::models::MentorRecord;

/// Errors that can occur when reading mentors from the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("Invalid mentor document {id}: {source}")]
    InvalidDocument {
        id: String,
        #[source]
        source: mongodb::bson::de::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of mentor records
#[async_trait]
pub trait MentorStore: Send + Sync {
    /// Fetch every mentor offering `"both"` or the requested format
    async fn find_eligible(&self, mentorship_format: &str) -> Result<Vec<MentorRecord>, StoreError>;

    /// Health check for the store connection
    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Fields projected from mentor documents for display and scoring
pub const MENTOR_FIELDS: &[&str] = &[
    "fullName",
    "email",
    "bio",
    "profilePicture",
    "mentorshipFormat",
    "industry",
    "menteeLevel",
    "yearsExperience",
    "currentRole",
    "education",
    "linkedIn",
    "completedSessions",
    "menteesCount",
    "averageRating",
    "totalRatings",
];

/// MongoDB-backed mentor store
pub struct MongoMentorStore {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoMentorStore {
    /// Connect to MongoDB and bind the mentor collection
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_selection_timeout = Some(server_selection_timeout);

        let client = Client::with_options(options)?;
        let collection = client.database(database).collection::<Document>(collection);

        tracing::info!("Using MongoDB database {} collection {}", database, collection.name());

        Ok(Self {
            client,
            database: database.to_string(),
            collection,
        })
    }
}

#[async_trait]
impl MentorStore for MongoMentorStore {
    async fn find_eligible(&self, mentorship_format: &str) -> Result<Vec<MentorRecord>, StoreError> {
        let options = FindOptions::builder().projection(mentor_projection()).build();

        let mut cursor = self
            .collection
            .find(eligibility_filter(mentorship_format))
            .with_options(options)
            .await?;

        let mut mentors = Vec::new();
        while cursor.advance().await? {
            let document: Document = cursor.deserialize_current()?;
            mentors.push(into_record(document)?);
        }

        tracing::debug!(
            "Fetched {} mentors for format {:?}",
            mentors.len(),
            mentorship_format
        );

        Ok(mentors)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Filter matching mentors that offer `"both"` or the requested format
pub fn eligibility_filter(mentorship_format: &str) -> Document {
    doc! { "mentorshipFormat": { "$in": eligible_formats(mentorship_format) } }
}

/// Projection limited to [`MENTOR_FIELDS`] (plus `_id`, always returned)
pub fn mentor_projection() -> Document {
    MENTOR_FIELDS
        .iter()
        .fold(Document::new(), |mut projection, field| {
            projection.insert(*field, 1);
            projection
        })
}

/// Render a document id as a display string
fn display_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert a projected mentor document into a record
pub fn into_record(mut document: Document) -> Result<MentorRecord, StoreError> {
    let id = document
        .remove("_id")
        .map(|id| display_id(&id))
        .unwrap_or_default();

    let mut record: MentorRecord = mongodb::bson::from_document(document)
        .map_err(|source| StoreError::InvalidDocument { id: id.clone(), source })?;
    record.id = id;

    Ok(record)
}
