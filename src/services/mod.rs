// Service exports
pub mod embeddings;
pub mod mongo;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use embeddings::{EmbeddingError, EmbeddingModel, HttpEmbedder};
pub use mongo::{MentorStore, MongoMentorStore, StoreError};
#[cfg(feature = "onnx")]
pub use onnx::OnnxEmbedder;
