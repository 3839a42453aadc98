use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredMentor;

/// Response for the suggest mentors endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestMentorsResponse {
    pub mentors: Vec<ScoredMentor>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Body returned on internal faults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalErrorResponse {
    pub detail: String,
}
