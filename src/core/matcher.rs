use thiserror::Error;

use crate::models::{MenteeQuery, MentorRecord, ScoredMentor, ScoringWeights};
use crate::core::{
    filters::is_eligible,
    scoring::{calculate_match_score, round_score},
    similarity::topic_similarities,
};
use crate::services::{EmbeddingError, EmbeddingModel, MentorStore, StoreError};

/// Number of mentors returned per suggestion request
pub const MAX_SUGGESTIONS: usize = 10;

/// Faults that abort a suggestion request
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Mentor store error: {0}")]
    Store(#[from] StoreError),

    #[error("Embedding model error: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub mentors: Vec<ScoredMentor>,
    pub total_candidates: usize,
}

/// Mentor ranking orchestrator
///
/// # Pipeline Stages
/// 1. Eligible candidate retrieval (mentorship format)
/// 2. Topic similarity via the embedding model
/// 3. Rule-based scoring (experience, level, rating, sessions)
/// 4. Stable descending sort and top-10 cutoff
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Fetch eligible mentors from the store and rank them for the query
    pub async fn suggest(
        &self,
        query: &MenteeQuery,
        store: &dyn MentorStore,
        embedder: &dyn EmbeddingModel,
    ) -> Result<RankResult, RankError> {
        let candidates = store.find_eligible(query.format()).await?;
        tracing::info!("Found {} eligible mentors", candidates.len());

        Ok(self.rank(query, candidates, embedder).await?)
    }

    /// Score and rank already-fetched candidates
    ///
    /// Candidates whose format does not fit the query are dropped before
    /// scoring. Ties keep the candidates' input order.
    pub async fn rank(
        &self,
        query: &MenteeQuery,
        candidates: Vec<MentorRecord>,
        embedder: &dyn EmbeddingModel,
    ) -> Result<RankResult, EmbeddingError> {
        let total_candidates = candidates.len();
        let format = query.format();

        let candidates: Vec<MentorRecord> = candidates
            .into_iter()
            .filter(|mentor| is_eligible(mentor, format))
            .collect();

        if candidates.len() < total_candidates {
            tracing::warn!(
                "Dropped {} mentors not offering format {:?}",
                total_candidates - candidates.len(),
                format
            );
        }

        let similarities = topic_similarities(&query.topics, &candidates, embedder).await?;

        let mut scored: Vec<ScoredMentor> = candidates
            .into_iter()
            .zip(similarities)
            .map(|(mentor, similarity)| {
                let breakdown = calculate_match_score(&mentor, query, similarity, &self.weights);
                tracing::debug!(
                    mentor_id = %mentor.id,
                    similarity,
                    topic = breakdown.topic,
                    experience = breakdown.experience,
                    level = breakdown.level,
                    rating = breakdown.rating,
                    session = breakdown.session,
                    "Scored mentor"
                );

                ScoredMentor {
                    match_score: round_score(breakdown.total()),
                    mentor,
                }
            })
            .collect();

        // Stable sort keeps retrieval order among equal scores
        scored.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        scored.truncate(MAX_SUGGESTIONS);

        Ok(RankResult {
            mentors: scored,
            total_candidates,
        })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
