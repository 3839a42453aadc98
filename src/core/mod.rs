// Core algorithm exports
pub mod experience;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use experience::{parse_experience, calculate_experience_score};
pub use filters::{eligible_formats, is_eligible, accepts_level};
pub use matcher::{Ranker, RankResult, RankError, MAX_SUGGESTIONS};
pub use scoring::{calculate_match_score, calculate_rating_score, calculate_session_score, round_score, ScoreBreakdown};
pub use similarity::{cosine_similarity, join_topics, topic_similarities};
