use std::sync::Arc;

use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::ports::{QuestionStore, StoreError};
use crate::modules::hotspot::core::question::{GroupStats, QuestionSummary, QuestionView};
use crate::modules::hotspot::core::validation::{
    validate_group_id, validate_limit, validate_question_id,
};

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 1000;

/// Read side of the hotspot questions: single lookups, listings and counts.
pub struct BrowseQuestionsHandler {
    store: Arc<dyn QuestionStore>,
}

impl BrowseQuestionsHandler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub async fn get(
        &self,
        group_id: &str,
        question_id: &str,
    ) -> Result<QuestionView, ApplicationError> {
        validate_group_id(group_id)?;
        validate_question_id(question_id)?;
        self.store
            .get(group_id, question_id)
            .await?
            .map(QuestionView::from)
            .ok_or_else(|| ApplicationError::NotFound(question_id.to_string()))
    }

    pub async fn list(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<QuestionSummary>, ApplicationError> {
        validate_group_id(group_id)?;
        validate_limit("limit", limit, MAX_LIST_LIMIT)?;
        match self.store.list(group_id, limit).await {
            Ok(questions) => Ok(questions),
            Err(StoreError::IndexMissing(_)) => Ok(vec![]),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn stats(&self, group_id: &str) -> Result<GroupStats, ApplicationError> {
        validate_group_id(group_id)?;
        Ok(self.store.stats(group_id).await?)
    }
}
