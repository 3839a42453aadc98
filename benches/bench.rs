// Criterion benchmarks for Mentor Match

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mentor_match::core::{calculate_match_score, cosine_similarity, Ranker};
use mentor_match::models::{MenteeQuery, MentorRecord, OneOrMany, ScoringWeights};
use mentor_match::services::{EmbeddingError, EmbeddingModel};

/// Cheap deterministic embedder so the benchmark measures the ranking path
struct HashEmbedder;

#[async_trait]
impl EmbeddingModel for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; 384];
                for (i, b) in text.bytes().enumerate() {
                    v[(b as usize * 31 + i) % 384] += 1.0;
                }
                v
            })
            .collect())
    }
}

fn create_mentor(id: usize) -> MentorRecord {
    let industries = ["AI", "Finance", "Design", "Healthcare", "Data Science"];
    MentorRecord {
        id: id.to_string(),
        full_name: Some(format!("Mentor {}", id)),
        mentorship_format: Some(if id % 2 == 0 { "both" } else { "online" }.to_string()),
        industry: Some(OneOrMany::from(vec![industries[id % industries.len()], "Leadership"])),
        mentee_level: Some(OneOrMany::from(vec!["undergraduate"])),
        years_experience: Some(format!("{}-{}", id % 10, id % 10 + 2).into()),
        completed_sessions: Some((id % 80) as i64),
        average_rating: Some((id % 5) as f64 + 0.5),
        total_ratings: Some((id % 3) as i64),
        ..Default::default()
    }
}

fn create_query() -> MenteeQuery {
    MenteeQuery {
        topics: vec!["AI".to_string(), "Machine Learning".to_string()],
        mentorship_format: Some("online".to_string()),
        preferred_experience: Some("3-5".to_string()),
        mentee_level: Some("undergraduate".to_string()),
    }
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let a: Vec<f32> = (0..384).map(|i| (i as f32).sin()).collect();
    let b: Vec<f32> = (0..384).map(|i| (i as f32).cos()).collect();

    c.bench_function("cosine_similarity_384", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)));
    });
}

fn bench_match_score(c: &mut Criterion) {
    let mentor = create_mentor(7);
    let query = create_query();
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |bench| {
        bench.iter(|| calculate_match_score(black_box(&mentor), black_box(&query), 0.42, &weights));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let query = create_query();
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates: Vec<MentorRecord> = (0..*candidate_count).map(create_mentor).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(candidate_count),
            &candidates,
            |bench, candidates| {
                bench.iter(|| {
                    runtime
                        .block_on(ranker.rank(&query, candidates.clone(), &HashEmbedder))
                        .expect("ranking")
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cosine_similarity, bench_match_score, bench_ranking);
criterion_main!(benches);
