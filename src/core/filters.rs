use crate::models::{requests::DEFAULT_FORMAT, MentorRecord};

/// Mentorship formats a mentor may offer to serve the requested format
///
/// Mentors offering `"both"` always qualify.
pub fn eligible_formats(requested: &str) -> Vec<String> {
    let mut formats = vec![DEFAULT_FORMAT.to_string()];
    if requested != DEFAULT_FORMAT {
        formats.push(requested.to_string());
    }
    formats
}

/// Check if a mentor offers a format compatible with the request
#[inline]
pub fn is_eligible(mentor: &MentorRecord, requested: &str) -> bool {
    match mentor.mentorship_format.as_deref() {
        Some(format) => format == DEFAULT_FORMAT || format == requested,
        None => false,
    }
}

/// Check if the mentor accepts the mentee's level
#[inline]
pub fn accepts_level(mentor: &MentorRecord, mentee_level: Option<&str>) -> bool {
    match mentee_level.filter(|level| !level.is_empty()) {
        Some(level) => mentor.accepted_levels().contains(&level),
        None => false,
    }
}
