use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::modules::hotspot::adapters::outbound::in_memory_question_store::InMemoryQuestionStore;
use crate::modules::hotspot::core::ports::{QuestionStore, StoreError};
use crate::modules::hotspot::core::question::{
    GroupStats, QuestionDocument, QuestionSummary, ScoredQuestion,
};

/// In memory store that fails `put` for one question id and `search` on one call.
#[derive(Default)]
pub struct FailingQuestionStore {
    inner: InMemoryQuestionStore,
    failing_put: Option<String>,
    failing_search: Option<usize>,
    searches: AtomicUsize,
}

impl FailingQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_put_for(mut self, question_id: &str) -> Self {
        self.failing_put = Some(question_id.to_string());
        self
    }

    /// Zero based index of the search call that fails.
    pub fn fail_search_call(mut self, call: usize) -> Self {
        self.failing_search = Some(call);
        self
    }
}

#[async_trait]
impl QuestionStore for FailingQuestionStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn ensure_index(&self, group_id: &str) -> Result<bool, StoreError> {
        self.inner.ensure_index(group_id).await
    }

    async fn rebuild_index(&self, group_id: &str) -> Result<(), StoreError> {
        self.inner.rebuild_index(group_id).await
    }

    async fn get(
        &self,
        group_id: &str,
        question_id: &str,
    ) -> Result<Option<QuestionDocument>, StoreError> {
        self.inner.get(group_id, question_id).await
    }

    async fn put(&self, group_id: &str, document: &QuestionDocument) -> Result<(), StoreError> {
        if self.failing_put.as_deref() == Some(document.question_id.as_str()) {
            return Err(StoreError::Backend("write refused".into()));
        }
        self.inner.put(group_id, document).await
    }

    async fn delete(&self, group_id: &str, question_id: &str) -> Result<bool, StoreError> {
        self.inner.delete(group_id, question_id).await
    }

    async fn delete_by_category(&self, group_id: &str, category: &str) -> Result<u64, StoreError> {
        self.inner.delete_by_category(group_id, category).await
    }

    async fn list(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<QuestionSummary>, StoreError> {
        self.inner.list(group_id, limit).await
    }

    async fn search(
        &self,
        group_id: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredQuestion>, StoreError> {
        let call = self.searches.fetch_add(1, Ordering::SeqCst);
        if self.failing_search == Some(call) {
            return Err(StoreError::Backend("search timed out".into()));
        }
        self.inner.search(group_id, vector, limit).await
    }

    async fn stats(&self, group_id: &str) -> Result<GroupStats, StoreError> {
        self.inner.stats(group_id).await
    }
}
