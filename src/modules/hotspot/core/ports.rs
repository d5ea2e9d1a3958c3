// Ports describe what the hotspot use cases need from the outside world.
//
// Adapters under adapters/outbound implement them: Redis Stack and in memory
// for the question store, an OpenAI compatible HTTP service and a local
// hashing embedder for embeddings.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::hotspot::core::question::{
    GroupStats, QuestionDocument, QuestionSummary, ScoredQuestion,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index {0} does not exist")]
    IndexMissing(String),

    #[error("malformed document {key}: {reason}")]
    Malformed { key: String, reason: String },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    /// Creates the group index unless it exists. Returns `true` when created.
    async fn ensure_index(&self, group_id: &str) -> Result<bool, StoreError>;

    /// Drops the group index, keeping documents, and creates it again.
    async fn rebuild_index(&self, group_id: &str) -> Result<(), StoreError>;

    async fn get(
        &self,
        group_id: &str,
        question_id: &str,
    ) -> Result<Option<QuestionDocument>, StoreError>;

    async fn put(&self, group_id: &str, document: &QuestionDocument) -> Result<(), StoreError>;

    async fn delete(&self, group_id: &str, question_id: &str) -> Result<bool, StoreError>;

    async fn delete_by_category(&self, group_id: &str, category: &str) -> Result<u64, StoreError>;

    async fn list(&self, group_id: &str, limit: usize)
    -> Result<Vec<QuestionSummary>, StoreError>;

    /// Nearest neighbours of `vector`, best match first.
    async fn search(
        &self,
        group_id: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredQuestion>, StoreError>;

    async fn stats(&self, group_id: &str) -> Result<GroupStats, StoreError>;
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Transport(String),

    #[error("embedding service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected embedding response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn dimension(&self) -> usize;

    /// One vector per input text, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no vector returned".into()))
    }
}
