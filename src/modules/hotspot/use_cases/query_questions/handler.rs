use serde::Serialize;
use std::sync::Arc;

use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::ports::{
    EmbeddingError, EmbeddingProvider, QuestionStore, StoreError,
};
use crate::modules::hotspot::core::question::ScoredQuestion;
use crate::modules::hotspot::core::similarity::retain_similar;
use crate::modules::hotspot::core::validation::{require_text, validate_group_id, validate_limit};

pub const DEFAULT_QUERY_LIMIT: usize = 3;
pub const MAX_QUERY_LIMIT: usize = 100;
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub min_similarity: f32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    pub results: Vec<ScoredQuestion>,
    pub total: usize,
    pub original_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchQueryEntry {
    pub query: String,
    pub query_index: usize,
    pub results: Vec<ScoredQuestion>,
    pub total: usize,
    pub original_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchQueryEntry {
    fn failed(query: String, query_index: usize, error: String) -> Self {
        Self {
            query,
            query_index,
            results: vec![],
            total: 0,
            original_count: 0,
            error: Some(error),
        }
    }
}

pub struct QueryQuestionsHandler {
    store: Arc<dyn QuestionStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    settings: SearchSettings,
}

impl QueryQuestionsHandler {
    pub fn new(
        store: Arc<dyn QuestionStore>,
        embeddings: Arc<dyn EmbeddingProvider>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            store,
            embeddings,
            settings,
        }
    }

    pub fn min_similarity(&self) -> f32 {
        self.settings.min_similarity
    }

    /// Nearest neighbours above the similarity floor, plus the count before filtering.
    async fn search(
        &self,
        group_id: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<(Vec<ScoredQuestion>, usize), StoreError> {
        let hits = match self.store.search(group_id, vector, limit).await {
            Ok(hits) => hits,
            Err(StoreError::IndexMissing(_)) => {
                tracing::debug!(group_id, "no index for group, nothing to search");
                vec![]
            }
            Err(e) => return Err(e),
        };
        let original_count = hits.len();
        Ok((retain_similar(hits, self.settings.min_similarity), original_count))
    }

    pub async fn handle(
        &self,
        group_id: &str,
        query: &str,
        limit: usize,
    ) -> Result<QueryOutcome, ApplicationError> {
        validate_group_id(group_id)?;
        require_text("query", query)?;
        validate_limit("limit", limit, MAX_QUERY_LIMIT)?;

        let vector = self.embeddings.embed(query).await?;
        let (results, original_count) = self.search(group_id, &vector, limit).await?;

        tracing::info!(
            group_id,
            original_count,
            kept = results.len(),
            "query finished"
        );
        Ok(QueryOutcome {
            query: query.to_string(),
            total: results.len(),
            results,
            original_count,
        })
    }

    /// Embeds every query in one call. A failing search only fails its own entry.
    pub async fn handle_batch(
        &self,
        group_id: &str,
        queries: Vec<String>,
        limit: usize,
    ) -> Result<Vec<BatchQueryEntry>, ApplicationError> {
        validate_group_id(group_id)?;
        if queries.is_empty() {
            return Err(ApplicationError::invalid("queries must not be empty"));
        }
        validate_limit("limit", limit, MAX_QUERY_LIMIT)?;

        tracing::info!(group_id, count = queries.len(), "embedding query batch");
        let vectors = self.embeddings.embed_batch(&queries).await?;
        if vectors.len() != queries.len() {
            return Err(ApplicationError::Embedding(EmbeddingError::InvalidResponse(
                format!("expected {} vectors, got {}", queries.len(), vectors.len()),
            )));
        }

        let mut entries = Vec::with_capacity(queries.len());
        for (query_index, (query, vector)) in queries.into_iter().zip(vectors).enumerate() {
            if query.trim().is_empty() {
                entries.push(BatchQueryEntry::failed(
                    query,
                    query_index,
                    "query must not be empty".into(),
                ));
                continue;
            }
            match self.search(group_id, &vector, limit).await {
                Ok((results, original_count)) => entries.push(BatchQueryEntry {
                    query,
                    query_index,
                    total: results.len(),
                    results,
                    original_count,
                    error: None,
                }),
                Err(e) => {
                    tracing::error!(
                        group_id,
                        query_index,
                        error = %e,
                        "batch query entry failed"
                    );
                    entries.push(BatchQueryEntry::failed(query, query_index, e.to_string()));
                }
            }
        }
        Ok(entries)
    }
}
