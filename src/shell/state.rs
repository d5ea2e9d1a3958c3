use std::sync::Arc;
use thiserror::Error;

use crate::modules::hotspot::adapters::outbound::hashing_embeddings::HashingEmbeddings;
use crate::modules::hotspot::adapters::outbound::http_embeddings::HttpEmbeddings;
use crate::modules::hotspot::adapters::outbound::in_memory_question_store::InMemoryQuestionStore;
use crate::modules::hotspot::adapters::outbound::redis_question_store::RedisQuestionStore;
use crate::modules::hotspot::core::ports::{
    EmbeddingError, EmbeddingProvider, QuestionStore, StoreError,
};
use crate::modules::hotspot::use_cases::add_question::handler::AddQuestionHandler;
use crate::modules::hotspot::use_cases::browse_questions::handler::BrowseQuestionsHandler;
use crate::modules::hotspot::use_cases::delete_questions::handler::DeleteQuestionsHandler;
use crate::modules::hotspot::use_cases::query_questions::handler::{
    QueryQuestionsHandler, SearchSettings,
};
use crate::modules::hotspot::use_cases::rebuild_index::handler::RebuildIndexHandler;
use crate::modules::hotspot::use_cases::update_question::handler::UpdateQuestionHandler;
use crate::shell::config::{Config, EmbeddingBackend, StoreBackend};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("question store: {0}")]
    Store(#[from] StoreError),

    #[error("embeddings: {0}")]
    Embedding(#[from] EmbeddingError),
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
    pub add_handler: Arc<AddQuestionHandler>,
    pub update_handler: Arc<UpdateQuestionHandler>,
    pub query_handler: Arc<QueryQuestionsHandler>,
    pub browse_handler: Arc<BrowseQuestionsHandler>,
    pub delete_handler: Arc<DeleteQuestionsHandler>,
    pub rebuild_handler: Arc<RebuildIndexHandler>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn QuestionStore>,
        embeddings: Arc<dyn EmbeddingProvider>,
        search: SearchSettings,
    ) -> Self {
        Self {
            add_handler: Arc::new(AddQuestionHandler::new(store.clone(), embeddings.clone())),
            update_handler: Arc::new(UpdateQuestionHandler::new(
                store.clone(),
                embeddings.clone(),
            )),
            query_handler: Arc::new(QueryQuestionsHandler::new(store.clone(), embeddings, search)),
            browse_handler: Arc::new(BrowseQuestionsHandler::new(store.clone())),
            delete_handler: Arc::new(DeleteQuestionsHandler::new(store.clone())),
            rebuild_handler: Arc::new(RebuildIndexHandler::new(store.clone())),
            store,
        }
    }

    /// Wires the adapters selected by `config`. Nothing connects yet.
    pub fn from_config(config: &Config) -> Result<Self, BootstrapError> {
        let dimension = config.embedding.dimension;
        let store: Arc<dyn QuestionStore> = match config.store {
            StoreBackend::Redis => Arc::new(RedisQuestionStore::new(&config.redis_url, dimension)?),
            StoreBackend::Memory => Arc::new(InMemoryQuestionStore::new()),
        };
        let embeddings: Arc<dyn EmbeddingProvider> = match config.embeddings {
            EmbeddingBackend::Http => Arc::new(HttpEmbeddings::new(&config.embedding)?),
            EmbeddingBackend::Hashing => Arc::new(HashingEmbeddings::new(dimension)),
        };
        tracing::info!(
            store = ?config.store,
            embeddings = ?config.embeddings,
            dimension,
            "wired hotspot adapters"
        );
        Ok(Self::new(
            store,
            embeddings,
            SearchSettings {
                min_similarity: config.min_similarity,
            },
        ))
    }
}

#[cfg(test)]
mod app_state_tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn it_should_wire_in_memory_adapters() {
        let vars = HashMap::from([
            ("HOTSPOT_STORE", "memory"),
            ("HOTSPOT_EMBEDDINGS", "hashing"),
            ("EMBEDDING_DIM", "32"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        let state = AppState::from_config(&config).unwrap();

        assert!(state.store.ping().await.is_ok());
        assert_eq!(state.query_handler.min_similarity(), 0.5);
    }

    #[test]
    fn it_should_reject_a_malformed_redis_url() {
        let vars = HashMap::from([("REDIS_URL", "not a url"), ("HOTSPOT_EMBEDDINGS", "hashing")]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert!(matches!(
            AppState::from_config(&config),
            Err(BootstrapError::Store(_))
        ));
    }
}
