use std::sync::Arc;

use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::ports::QuestionStore;
use crate::modules::hotspot::core::validation::validate_group_id;

/// Drops and recreates a group index so stored documents are indexed again.
pub struct RebuildIndexHandler {
    store: Arc<dyn QuestionStore>,
}

impl RebuildIndexHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, group_id: &str) -> Result<(), ApplicationError> {
        validate_group_id(group_id)?;
        tracing::warn!(group_id, "rebuilding index");
        self.store.rebuild_index(group_id).await?;
        tracing::info!(group_id, "index rebuilt");
        Ok(())
    }
}

#[cfg(test)]
mod rebuild_index_handler_tests {
    use super::*;
    use crate::modules::hotspot::adapters::outbound::in_memory_question_store::InMemoryQuestionStore;
    use crate::modules::hotspot::core::question::IndexStatus;
    use crate::tests::fixtures::questions::make_question_document;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_make_existing_documents_searchable_again() {
        let store = Arc::new(InMemoryQuestionStore::new());
        store
            .put("acme", &make_question_document("q-1", "account", vec![1.0]))
            .await
            .unwrap();
        assert_eq!(store.stats("acme").await.unwrap().index_status, IndexStatus::Missing);

        RebuildIndexHandler::new(store.clone())
            .handle("acme")
            .await
            .unwrap();

        let stats = store.stats("acme").await.unwrap();
        assert_eq!(stats.index_status, IndexStatus::Active);
        assert_eq!(stats.total_questions, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_store_is_offline() {
        let mut store = InMemoryQuestionStore::new();
        store.toggle_offline();
        let result = RebuildIndexHandler::new(Arc::new(store)).handle("acme").await;
        assert!(matches!(result, Err(ApplicationError::Store(_))));
    }
}
