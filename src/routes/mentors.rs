use actix_web::{error::ResponseError, http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::core::{RankError, Ranker};
use crate::models::{ErrorResponse, HealthResponse, InternalErrorResponse, MenteeQuery, SuggestMentorsResponse};
use crate::services::{EmbeddingModel, MentorStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MentorStore>,
    pub embedder: Arc<dyn EmbeddingModel>,
    pub ranker: Ranker,
}

/// Configure all mentor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/suggest-mentors/", web::post().to(suggest_mentors))
        .route("/suggest-mentors", web::post().to(suggest_mentors));
}

impl ResponseError for RankError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(InternalErrorResponse {
            detail: "Internal Server Error".to_string(),
        })
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Mentor store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Suggest mentors endpoint
///
/// POST /suggest-mentors/
///
/// Request body:
/// ```json
/// {
///   "topics": ["string"],
///   "mentorshipFormat": "both",
///   "preferredExperience": "3-5",
///   "menteeLevel": "string"
/// }
/// ```
///
/// Returns at most 10 mentors sorted by `matchScore`, or a 500 with a
/// generic detail when the store or the embedding model fails.
async fn suggest_mentors(
    state: web::Data<AppState>,
    req: web::Json<MenteeQuery>,
) -> HttpResponse {
    let query = req.into_inner();

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for suggest_mentors request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let span = tracing::info_span!("suggest_mentors", request_id = %uuid::Uuid::new_v4());

    async move {
        tracing::info!(
            "Received query: topics={:?}, format={}, experience={:?}, level={:?}",
            query.topics,
            query.format(),
            query.preferred_experience,
            query.mentee_level
        );

        match state
            .ranker
            .suggest(&query, state.store.as_ref(), state.embedder.as_ref())
            .await
        {
            Ok(result) => {
                tracing::info!(
                    "Returning {} mentors (from {} candidates)",
                    result.mentors.len(),
                    result.total_candidates
                );
                HttpResponse::Ok().json(SuggestMentorsResponse {
                    mentors: result.mentors,
                })
            }
            Err(e) => {
                tracing::error!("Error in suggest_mentors: {}", e);
                e.error_response()
            }
        }
    }
    .instrument(span)
    .await
}
