use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::ports::{EmbeddingError, EmbeddingProvider, QuestionStore};
use crate::modules::hotspot::core::question::now_timestamp;
use crate::modules::hotspot::core::validation::validate_group_id;
use crate::modules::hotspot::use_cases::add_question::command::AddQuestion;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedItem {
    pub question_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failed_count: usize,
    pub failed_items: Vec<FailedItem>,
    pub total_processed: usize,
}

pub struct AddQuestionHandler {
    store: Arc<dyn QuestionStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl AddQuestionHandler {
    pub fn new(store: Arc<dyn QuestionStore>, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embeddings }
    }

    async fn ensure_index(&self, group_id: &str) {
        match self.store.ensure_index(group_id).await {
            Ok(true) => tracing::info!(group_id, "created index for new group"),
            Ok(false) => {}
            Err(e) => tracing::warn!(group_id, error = %e, "index creation failed, storing anyway"),
        }
    }

    pub async fn handle(
        &self,
        group_id: &str,
        command: AddQuestion,
    ) -> Result<String, ApplicationError> {
        validate_group_id(group_id)?;
        command.validate()?;
        self.ensure_index(group_id).await;

        if self.store.get(group_id, &command.question_id).await?.is_some() {
            return Err(ApplicationError::AlreadyExists(command.question_id));
        }

        let vector = self.embeddings.embed(&command.question).await?;
        let document = command.into_document(vector, &now_timestamp());
        self.store.put(group_id, &document).await?;

        tracing::info!(group_id, question_id = %document.question_id, "added hotspot question");
        Ok(document.question_id)
    }

    pub async fn handle_batch(
        &self,
        group_id: &str,
        commands: Vec<AddQuestion>,
    ) -> Result<BatchOutcome, ApplicationError> {
        validate_group_id(group_id)?;
        if commands.is_empty() {
            return Err(ApplicationError::invalid("question_info_list must not be empty"));
        }
        let mut seen = HashSet::new();
        for command in &commands {
            command.validate()?;
            if !seen.insert(command.question_id.as_str()) {
                return Err(ApplicationError::invalid(format!(
                    "question_id {} appears more than once",
                    command.question_id
                )));
            }
        }
        self.ensure_index(group_id).await;

        let mut existing = Vec::new();
        for command in &commands {
            if self.store.get(group_id, &command.question_id).await?.is_some() {
                existing.push(command.question_id.clone());
            }
        }
        if !existing.is_empty() {
            return Err(ApplicationError::AlreadyExistMany(existing));
        }

        let texts: Vec<String> = commands.iter().map(|c| c.question.clone()).collect();
        tracing::info!(group_id, count = texts.len(), "embedding question batch");
        let vectors = self.embeddings.embed_batch(&texts).await?;
        if vectors.len() != commands.len() {
            return Err(ApplicationError::Embedding(EmbeddingError::InvalidResponse(
                format!("expected {} vectors, got {}", commands.len(), vectors.len()),
            )));
        }

        let total_processed = commands.len();
        let timestamp = now_timestamp();
        let mut success_count = 0;
        let mut failed_items = Vec::new();
        for (command, vector) in commands.into_iter().zip(vectors) {
            let document = command.into_document(vector, &timestamp);
            match self.store.put(group_id, &document).await {
                Ok(()) => success_count += 1,
                Err(e) => {
                    tracing::error!(
                        group_id,
                        question_id = %document.question_id,
                        error = %e,
                        "failed to store question"
                    );
                    failed_items.push(FailedItem {
                        question_id: document.question_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            group_id,
            success_count,
            failed_count = failed_items.len(),
            "batch add finished"
        );
        Ok(BatchOutcome {
            success_count,
            failed_count: failed_items.len(),
            failed_items,
            total_processed,
        })
    }
}
