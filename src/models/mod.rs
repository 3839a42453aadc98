// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{MentorRecord, OneOrMany, ScoredMentor, ScoringWeights, YearsExperience};
pub use requests::MenteeQuery;
pub use responses::{ErrorResponse, HealthResponse, InternalErrorResponse, SuggestMentorsResponse};
