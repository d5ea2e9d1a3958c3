use std::sync::Arc;

use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::ports::{EmbeddingProvider, QuestionStore};
use crate::modules::hotspot::core::question::now_timestamp;
use crate::modules::hotspot::core::validation::validate_group_id;
use crate::modules::hotspot::use_cases::update_question::command::UpdateQuestion;

pub struct UpdateQuestionHandler {
    store: Arc<dyn QuestionStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl UpdateQuestionHandler {
    pub fn new(store: Arc<dyn QuestionStore>, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embeddings }
    }

    pub async fn handle(
        &self,
        group_id: &str,
        command: UpdateQuestion,
    ) -> Result<String, ApplicationError> {
        validate_group_id(group_id)?;
        command.validate()?;

        let mut document = self
            .store
            .get(group_id, &command.question_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(command.question_id.clone()))?;

        if let Some(question) = command.changed_question(&document) {
            tracing::debug!(
                group_id,
                question_id = %document.question_id,
                "question text changed, re-embedding"
            );
            document.query_vector = self.embeddings.embed(question).await?;
        }
        command.apply(&mut document, &now_timestamp());
        self.store.put(group_id, &document).await?;

        tracing::info!(group_id, question_id = %document.question_id, "updated hotspot question");
        Ok(document.question_id)
    }
}
