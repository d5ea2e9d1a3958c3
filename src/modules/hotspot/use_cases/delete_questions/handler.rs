use std::sync::Arc;

use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::ports::{QuestionStore, StoreError};
use crate::modules::hotspot::core::validation::{
    validate_category, validate_group_id, validate_question_id,
};

pub struct DeleteQuestionsHandler {
    store: Arc<dyn QuestionStore>,
}

impl DeleteQuestionsHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn delete(&self, group_id: &str, question_id: &str) -> Result<(), ApplicationError> {
        validate_group_id(group_id)?;
        validate_question_id(question_id)?;
        if !self.store.delete(group_id, question_id).await? {
            return Err(ApplicationError::NotFound(question_id.to_string()));
        }
        tracing::info!(group_id, question_id, "deleted hotspot question");
        Ok(())
    }

    /// Removes every question of the group filed under `category`.
    pub async fn delete_by_category(
        &self,
        group_id: &str,
        category: &str,
    ) -> Result<u64, ApplicationError> {
        validate_group_id(group_id)?;
        validate_category(category)?;
        let deleted = match self.store.delete_by_category(group_id, category).await {
            Ok(deleted) => deleted,
            Err(StoreError::IndexMissing(_)) => 0,
            Err(e) => return Err(e.into()),
        };
        tracing::info!(group_id, category, deleted, "deleted hotspot category");
        Ok(deleted)
    }
}

#[cfg(test)]
mod delete_questions_handler_tests {
    use super::*;
    use crate::modules::hotspot::adapters::outbound::in_memory_question_store::InMemoryQuestionStore;
    use crate::tests::fixtures::questions::make_question_document;
    use rstest::{fixture, rstest};

    const GROUP: &str = "acme";

    type BeforeEachReturn = (Arc<InMemoryQuestionStore>, DeleteQuestionsHandler);

    #[fixture]
    async fn before_each() -> BeforeEachReturn {
        let store = Arc::new(InMemoryQuestionStore::new());
        store.ensure_index(GROUP).await.unwrap();
        for (id, category) in [("q-1", "account"), ("q-2", "account"), ("q-3", "billing")] {
            store
                .put(GROUP, &make_question_document(id, category, vec![1.0]))
                .await
                .unwrap();
        }
        (store.clone(), DeleteQuestionsHandler::new(store))
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_a_question(#[future] before_each: BeforeEachReturn) {
        let (store, handler) = before_each.await;
        handler.delete(GROUP, "q-1").await.unwrap();
        assert!(store.get(GROUP, "q-1").await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_delete_an_unknown_question(#[future] before_each: BeforeEachReturn) {
        let (_, handler) = before_each.await;
        let result = handler.delete(GROUP, "q-9").await;
        assert!(matches!(result, Err(ApplicationError::NotFound(id)) if id == "q-9"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_a_whole_category(#[future] before_each: BeforeEachReturn) {
        let (store, handler) = before_each.await;
        assert_eq!(handler.delete_by_category(GROUP, "account").await.unwrap(), 2);
        assert_eq!(handler.delete_by_category(GROUP, "Account").await.unwrap(), 0);
        assert!(store.get(GROUP, "q-3").await.unwrap().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_category_spanning_several_tags(
        #[future] before_each: BeforeEachReturn,
    ) {
        let (_, handler) = before_each.await;
        let result = handler.delete_by_category(GROUP, "account,billing").await;
        assert!(matches!(result, Err(ApplicationError::Invalid(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_nothing_without_an_index(#[future] before_each: BeforeEachReturn) {
        let (_, handler) = before_each.await;
        assert_eq!(handler.delete_by_category("other", "account").await.unwrap(), 0);
    }
}
