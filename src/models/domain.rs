use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize};

/// A stored field that may hold either a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Normalize to an ordered list; an empty lone string becomes an empty list
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(value) if value.is_empty() => Vec::new(),
            OneOrMany::One(value) => vec![value.as_str()],
            OneOrMany::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(String::from).collect())
    }
}

/// Stored experience range such as `"3-5"`
///
/// Profiles written by older clients sometimes hold a bare number or another
/// non-string value. Those are kept as-is so they are echoed back unchanged,
/// and score as neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearsExperience {
    Range(String),
    Other(Bson),
}

impl YearsExperience {
    pub fn as_range(&self) -> Option<&str> {
        match self {
            YearsExperience::Range(range) => Some(range),
            YearsExperience::Other(_) => None,
        }
    }
}

impl From<&str> for YearsExperience {
    fn from(value: &str) -> Self {
        YearsExperience::Range(value.to_string())
    }
}

impl From<String> for YearsExperience {
    fn from(value: String) -> Self {
        YearsExperience::Range(value)
    }
}

/// Mentor profile as projected from the mentor collection
///
/// Fields missing from the stored document stay `None` and are omitted when
/// the record is serialized back out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "profilePicture", default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(rename = "linkedIn", default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(rename = "currentRole", default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(rename = "mentorshipFormat", default, skip_serializing_if = "Option::is_none")]
    pub mentorship_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<OneOrMany>,
    #[serde(rename = "menteeLevel", default, skip_serializing_if = "Option::is_none")]
    pub mentee_level: Option<OneOrMany>,
    #[serde(rename = "yearsExperience", default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<YearsExperience>,
    #[serde(
        rename = "completedSessions",
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_sessions: Option<i64>,
    #[serde(
        rename = "menteesCount",
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub mentees_count: Option<i64>,
    #[serde(rename = "averageRating", default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(
        rename = "totalRatings",
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_ratings: Option<i64>,
}

impl MentorRecord {
    /// Industries the mentor covers, used as the mentor's topics
    pub fn topics(&self) -> Vec<&str> {
        self.industry.as_ref().map(OneOrMany::as_list).unwrap_or_default()
    }

    /// Mentee levels this mentor accepts
    pub fn accepted_levels(&self) -> Vec<&str> {
        self.mentee_level.as_ref().map(OneOrMany::as_list).unwrap_or_default()
    }

    pub fn sessions(&self) -> i64 {
        self.completed_sessions.unwrap_or(0)
    }

    pub fn rating(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }

    pub fn rating_count(&self) -> i64 {
        self.total_ratings.unwrap_or(0)
    }
}

/// Counters written by other services may be stored as doubles
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Number>::deserialize(deserializer)?.map(|n| match n {
        Number::Int(value) => value,
        Number::Float(value) if value.is_finite() => value.trunc() as i64,
        Number::Float(_) => 0,
    }))
}

/// Mentor returned to the caller with its blended match score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMentor {
    #[serde(flatten)]
    pub mentor: MentorRecord,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Scoring weights
///
/// Defaults reproduce the production formula: topic similarity x40,
/// experience 0-20 (neutral 10), mentee level 15 or 5, rating 0-15
/// (unrated 5) and session history 0-10 saturating at 50 sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub topic: f64,
    pub experience_max: f64,
    pub experience_neutral: f64,
    pub level_match: f64,
    pub level_neutral: f64,
    pub rating_max: f64,
    pub rating_neutral: f64,
    pub session_max: f64,
    pub session_saturation: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            topic: 40.0,
            experience_max: 20.0,
            experience_neutral: 10.0,
            level_match: 15.0,
            level_neutral: 5.0,
            rating_max: 15.0,
            rating_neutral: 5.0,
            session_max: 10.0,
            session_saturation: 50.0,
        }
    }
}
