// Shared fakes for the mentor store and embedding model
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use mentor_match::core::is_eligible;
use mentor_match::models::{MentorRecord, OneOrMany};
use mentor_match::services::{EmbeddingError, EmbeddingModel, MentorStore, StoreError};

/// Mentor store backed by a vector, applying the same eligibility rule as MongoDB
pub struct InMemoryStore {
    mentors: Vec<MentorRecord>,
    available: bool,
}

impl InMemoryStore {
    pub fn new(mentors: Vec<MentorRecord>) -> Self {
        Self { mentors, available: true }
    }

    pub fn unavailable() -> Self {
        Self { mentors: vec![], available: false }
    }
}

#[async_trait]
impl MentorStore for InMemoryStore {
    async fn find_eligible(&self, mentorship_format: &str) -> Result<Vec<MentorRecord>, StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(self
            .mentors
            .iter()
            .filter(|mentor| is_eligible(mentor, mentorship_format))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        if self.available {
            Ok(true)
        } else {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }
}

/// Embeds text as lowercase letter counts: deterministic, and texts sharing
/// letters end up with positive similarity
pub struct LetterEmbedder {
    pub calls: AtomicUsize,
}

impl LetterEmbedder {
    pub fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingModel for LetterEmbedder {
    fn name(&self) -> &str {
        "letters"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|text| letter_vector(text)).collect())
    }
}

pub fn letter_vector(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; 26];
    for c in text.to_lowercase().bytes().filter(u8::is_ascii_lowercase) {
        vector[(c - b'a') as usize] += 1.0;
    }
    vector
}

/// Embedding model that is always down
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingModel for FailingEmbedder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::ApiError("model unavailable".to_string()))
    }
}

pub fn create_mentor(id: &str, format: &str, industry: &[&str]) -> MentorRecord {
    MentorRecord {
        id: id.to_string(),
        full_name: Some(format!("Mentor {}", id)),
        email: Some(format!("mentor{}@example.com", id)),
        mentorship_format: Some(format.to_string()),
        industry: Some(OneOrMany::from(industry.to_vec())),
        ..Default::default()
    }
}
