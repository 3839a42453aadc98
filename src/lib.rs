//! Mentor Match - mentor suggestion service
//!
//! Ranks mentor profiles against a mentee's preferences by blending
//! sentence-embedding topic similarity with rule-based sub-scores for
//! experience, mentee level, rating and session history.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Ranker, RankResult, RankError, parse_experience, cosine_similarity};
pub use crate::models::{MenteeQuery, MentorRecord, ScoredMentor, ScoringWeights, SuggestMentorsResponse};
pub use crate::services::{EmbeddingModel, EmbeddingError, MentorStore, StoreError};
