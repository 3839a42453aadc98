use serde::{Deserialize, Serialize};
use validator::Validate;

/// Mentee preferences submitted to the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenteeQuery {
    #[validate(length(max = 50))]
    pub topics: Vec<String>,
    #[serde(rename = "mentorshipFormat", default = "default_format")]
    pub mentorship_format: Option<String>,
    #[serde(rename = "preferredExperience", default)]
    pub preferred_experience: Option<String>,
    #[serde(rename = "menteeLevel", default)]
    pub mentee_level: Option<String>,
}

pub const DEFAULT_FORMAT: &str = "both";

fn default_format() -> Option<String> {
    Some(DEFAULT_FORMAT.to_string())
}

impl MenteeQuery {
    pub fn new(topics: Vec<String>) -> Self {
        Self {
            topics,
            mentorship_format: default_format(),
            preferred_experience: None,
            mentee_level: None,
        }
    }

    /// Requested mentorship format, `"both"` when unset or null
    pub fn format(&self) -> &str {
        self.mentorship_format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }
}
