use crate::models::MentorRecord;
use crate::services::embeddings::{EmbeddingError, EmbeddingModel};

/// Cosine similarity between two embedding vectors, in [-1, 1]
///
/// Returns 0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Join a topic list into the single text that gets embedded
pub fn join_topics<S: AsRef<str>>(topics: &[S]) -> String {
    topics
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compute the topic similarity of every candidate against the mentee topics
///
/// Candidates without industries, or any candidate when the mentee gave no
/// topics, get 0 without touching the model. The mentee text is embedded once
/// and all mentor texts go to the model in a single `embed` call.
pub async fn topic_similarities(
    mentee_topics: &[String],
    candidates: &[MentorRecord],
    embedder: &dyn EmbeddingModel,
) -> Result<Vec<f64>, EmbeddingError> {
    let mut similarities = vec![0.0; candidates.len()];
    if mentee_topics.is_empty() {
        return Ok(similarities);
    }

    let mut texts = vec![join_topics(mentee_topics)];
    let mut positions = Vec::new();
    for (position, mentor) in candidates.iter().enumerate() {
        let topics = mentor.topics();
        if !topics.is_empty() {
            texts.push(join_topics(&topics));
            positions.push(position);
        }
    }

    if positions.is_empty() {
        return Ok(similarities);
    }

    let vectors = embedder.embed(&texts).await?;
    if vectors.len() != texts.len() {
        return Err(EmbeddingError::InvalidResponse(format!(
            "expected {} embeddings, got {}",
            texts.len(),
            vectors.len()
        )));
    }

    let mentee_vector = &vectors[0];
    for (position, mentor_vector) in positions.into_iter().zip(&vectors[1..]) {
        similarities[position] = cosine_similarity(mentor_vector, mentee_vector);
    }

    Ok(similarities)
}
