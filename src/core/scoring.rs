use crate::models::{MenteeQuery, MentorRecord, ScoringWeights, YearsExperience};
use crate::core::{experience::calculate_experience_score, filters::accepts_level};

/// Per-component contributions to a mentor's match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub topic: f64,
    pub experience: f64,
    pub level: f64,
    pub rating: f64,
    pub session: f64,
}

impl ScoreBreakdown {
    /// Unrounded sum of all components
    pub fn total(&self) -> f64 {
        self.topic + self.experience + self.level + self.rating + self.session
    }
}

/// Calculate the match score components for a mentor
///
/// Scoring formula (default weights):
/// score = (
///     topic_similarity * 40 +      # cosine similarity of joined topic lists
///     experience_score +           # 20 - |years diff|, floored at 0, neutral 10
///     level_score +                # 15 if the mentee level is accepted, else 5
///     rating_score +               # rating / 5 * 15, or 5 when unrated
///     session_score                # min(sessions / 50, 1) * 10
/// )
///
/// The total is not clamped: a negative similarity pulls it down.
pub fn calculate_match_score(
    mentor: &MentorRecord,
    query: &MenteeQuery,
    topic_similarity: f64,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    // A non-string stored range cannot be parsed and scores neutral
    let experience = match &mentor.years_experience {
        Some(YearsExperience::Other(_)) => weights.experience_neutral,
        years => calculate_experience_score(
            query.preferred_experience.as_deref(),
            years.as_ref().and_then(YearsExperience::as_range),
            weights.experience_max,
            weights.experience_neutral,
        ),
    };

    let level = if accepts_level(mentor, query.mentee_level.as_deref()) {
        weights.level_match
    } else {
        weights.level_neutral
    };

    ScoreBreakdown {
        topic: topic_similarity * weights.topic,
        experience,
        level,
        rating: calculate_rating_score(mentor.rating(), mentor.rating_count(), weights),
        session: calculate_session_score(mentor.sessions(), weights),
    }
}

/// Rating score, a flat neutral value until the mentor has been rated
#[inline]
pub fn calculate_rating_score(average_rating: f64, total_ratings: i64, weights: &ScoringWeights) -> f64 {
    if total_ratings > 0 {
        (average_rating / 5.0) * weights.rating_max
    } else {
        weights.rating_neutral
    }
}

/// Session history score, saturating once `session_saturation` is reached
#[inline]
pub fn calculate_session_score(completed_sessions: i64, weights: &ScoringWeights) -> f64 {
    if weights.session_saturation <= 0.0 {
        return weights.session_max;
    }
    (completed_sessions as f64 / weights.session_saturation).min(1.0) * weights.session_max
}

/// Round a score to 2 decimal places
///
/// Rounds the exact binary value, with ties going to the even digit, so
/// `28.125` becomes `28.12`.
#[inline]
pub fn round_score(score: f64) -> f64 {
    format!("{:.2}", score).parse().unwrap_or(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OneOrMany;

    fn create_test_mentor() -> MentorRecord {
        MentorRecord {
            id: "mentor_1".to_string(),
            full_name: Some("Test Mentor".to_string()),
            mentorship_format: Some("both".to_string()),
            industry: Some(OneOrMany::from(vec!["AI"])),
            mentee_level: Some(OneOrMany::from(vec!["undergraduate"])),
            years_experience: Some("3-5".into()),
            completed_sessions: Some(25),
            average_rating: Some(4.0),
            total_ratings: Some(10),
            ..Default::default()
        }
    }

    fn create_test_query() -> MenteeQuery {
        MenteeQuery {
            topics: vec!["AI".to_string()],
            mentorship_format: Some("both".to_string()),
            preferred_experience: Some("3-5".to_string()),
            mentee_level: Some("undergraduate".to_string()),
        }
    }

    #[test]
    fn test_calculate_match_score() {
        let mentor = create_test_mentor();
        let query = create_test_query();
        let weights = ScoringWeights::default();

        let breakdown = calculate_match_score(&mentor, &query, 0.5, &weights);

        assert_eq!(breakdown.topic, 20.0);
        assert_eq!(breakdown.experience, 20.0);
        assert_eq!(breakdown.level, 15.0);
        assert!((breakdown.rating - 12.0).abs() < 1e-9);
        assert_eq!(breakdown.session, 5.0);
        assert_eq!(round_score(breakdown.total()), 72.0);
    }

    #[test]
    fn test_level_mismatch_is_neutral() {
        let mentor = create_test_mentor();
        let mut query = create_test_query();
        query.mentee_level = Some("graduate".to_string());

        let breakdown = calculate_match_score(&mentor, &query, 0.0, &ScoringWeights::default());

        assert_eq!(breakdown.level, 5.0);
    }

    #[test]
    fn test_rating_score() {
        let weights = ScoringWeights::default();

        // No ratings yet = neutral regardless of stored average
        assert_eq!(calculate_rating_score(4.9, 0, &weights), 5.0);
        assert_eq!(calculate_rating_score(0.0, 0, &weights), 5.0);

        assert_eq!(calculate_rating_score(5.0, 3, &weights), 15.0);
        assert_eq!(calculate_rating_score(0.0, 3, &weights), 0.0);
    }

    #[test]
    fn test_session_score() {
        let weights = ScoringWeights::default();

        assert_eq!(calculate_session_score(0, &weights), 0.0);
        assert_eq!(calculate_session_score(25, &weights), 5.0);
        assert_eq!(calculate_session_score(50, &weights), 10.0);
        assert_eq!(calculate_session_score(500, &weights), 10.0);
    }

    #[test]
    fn test_negative_similarity_lowers_total() {
        let mentor = MentorRecord::default();
        let query = MenteeQuery::new(vec!["AI".to_string()]);

        let breakdown = calculate_match_score(&mentor, &query, -0.5, &ScoringWeights::default());

        // -20 topic + 10 neutral experience + 5 level + 5 unrated + 0 sessions
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(72.3456), 72.35);
        assert_eq!(round_score(10.0), 10.0);
        assert_eq!(round_score(-3.14159), -3.14);
    }

    #[test]
    fn test_round_score_ties_go_to_even() {
        assert_eq!(round_score(28.125), 28.12);
        assert_eq!(round_score(0.125), 0.12);
        assert_eq!(round_score(0.375), 0.38);
        // 2.675 is stored just below the tie
        assert_eq!(round_score(2.675), 2.67);
    }

    #[test]
    fn test_rated_mentor_without_topics_rounds_half_even() {
        let mentor = MentorRecord {
            average_rating: Some(4.375),
            total_ratings: Some(8),
            ..Default::default()
        };
        let query = MenteeQuery::new(Vec::new());

        let breakdown = calculate_match_score(&mentor, &query, 0.0, &ScoringWeights::default());

        // 10 neutral experience + 5 level + 13.125 rating + 0 sessions
        assert_eq!(breakdown.total(), 28.125);
        assert_eq!(round_score(breakdown.total()), 28.12);
    }

    #[test]
    fn test_non_string_experience_scores_neutral() {
        let mut mentor = create_test_mentor();
        mentor.years_experience = Some(YearsExperience::Other(mongodb::bson::Bson::Int32(5)));
        let query = create_test_query();

        let breakdown = calculate_match_score(&mentor, &query, 0.0, &ScoringWeights::default());

        assert_eq!(breakdown.experience, 10.0);
    }
}
