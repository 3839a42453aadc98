//! Local sentence embeddings with ONNX Runtime.
//!
//! Runs an exported `all-MiniLM-L6-v2` model: WordPiece tokenization, one
//! forward pass, attention-masked mean pooling and L2 normalization. The
//! output matches what sentence-transformers produces for the same model.

use async_trait::async_trait;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};

use super::embeddings::{EmbeddingError, EmbeddingModel};

/// Output embedding dimension for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Token limit sentence-transformers applies to all-MiniLM-L6-v2.
pub const MAX_SEQ_LENGTH: usize = 256;

struct OnnxInner {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

/// ONNX-based embedding model
///
/// Inference is CPU-bound, so each `embed` call runs on tokio's blocking pool.
/// The session sits behind a mutex and is shared by all requests.
#[derive(Clone)]
pub struct OnnxEmbedder {
    inner: Arc<OnnxInner>,
}

fn model_err(e: impl std::fmt::Display) -> EmbeddingError {
    EmbeddingError::ModelError(e.to_string())
}

impl OnnxEmbedder {
    /// Load the ONNX model and its HuggingFace tokenizer
    pub fn new(
        model_path: impl AsRef<Path>,
        tokenizer_path: impl AsRef<Path>,
        intra_threads: usize,
    ) -> Result<Self, EmbeddingError> {
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        let session = Session::builder()
            .map_err(model_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(model_err)?
            .with_intra_threads(intra_threads)
            .map_err(model_err)?
            .commit_from_file(model_path)
            .map_err(|e| model_err(format!("failed to load {:?}: {}", model_path, e)))?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| model_err(format!("failed to load {:?}: {}", tokenizer_path, e)))?;
        configure_tokenizer(&mut tokenizer)?;

        tracing::info!("Loaded ONNX embedding model from {:?}", model_path);

        Ok(Self {
            inner: Arc::new(OnnxInner {
                session: Mutex::new(session),
                tokenizer,
            }),
        })
    }
}

/// One text per forward pass, so no padding; truncate where
/// sentence-transformers does rather than where `tokenizer.json` says
fn configure_tokenizer(tokenizer: &mut Tokenizer) -> Result<(), EmbeddingError> {
    tokenizer.with_padding(None);
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQ_LENGTH,
            ..Default::default()
        }))
        .map_err(model_err)?;
    Ok(())
}

impl OnnxInner {
    fn embed_blocking(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| model_err(format!("tokenization failed: {}", e)))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding.get_attention_mask().iter().map(|&m| m as i64).collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();
        let seq_len = input_ids.len();

        let ids_tensor = Tensor::from_array(([1, seq_len], input_ids)).map_err(model_err)?;
        let mask_tensor = Tensor::from_array(([1, seq_len], attention_mask.clone())).map_err(model_err)?;
        let type_tensor = Tensor::from_array(([1, seq_len], token_type_ids)).map_err(model_err)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| model_err(format!("session lock poisoned: {}", e)))?;
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor
            ])
            .map_err(model_err)?;

        // [1, seq_len, EMBEDDING_DIM]
        let token_embeddings = outputs["last_hidden_state"]
            .try_extract_array::<f32>()
            .map_err(model_err)?;

        let shape = token_embeddings.shape();
        if shape != [1, seq_len, EMBEDDING_DIM] {
            return Err(model_err(format!(
                "expected output shape [1, {}, {}], got {:?}",
                seq_len, EMBEDDING_DIM, shape
            )));
        }

        let mut embedding = vec![0.0f32; EMBEDDING_DIM];
        let mut mask_sum = 0.0f32;
        for (s, &m) in attention_mask.iter().enumerate() {
            if m > 0 {
                mask_sum += m as f32;
                for (d, value) in embedding.iter_mut().enumerate() {
                    *value += token_embeddings[[0, s, d]] * m as f32;
                }
            }
        }

        if mask_sum > 0.0 {
            embedding.iter_mut().for_each(|v| *v /= mask_sum);
        }

        let norm = embedding.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|v| *v /= norm);
        }

        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingModel for OnnxEmbedder {
    fn name(&self) -> &str {
        "all-MiniLM-L6-v2 (onnx)"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let inner = Arc::clone(&self.inner);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            texts
                .iter()
                .map(|text| inner.embed_blocking(text))
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| model_err(format!("inference task failed: {}", e)))?
    }
}
