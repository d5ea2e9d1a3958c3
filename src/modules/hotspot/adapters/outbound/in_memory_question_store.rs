// In memory question store.
//
// Purpose
// - Exercise the use cases and HTTP handlers without Redis.
// - Serve local development when HOTSPOT_STORE=memory.
//
// Search is brute force cosine similarity over the group's documents, which
// is fine for the small collections a single group holds.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

use crate::modules::hotspot::core::ports::{QuestionStore, StoreError};
use crate::modules::hotspot::core::question::{
    GroupStats, IndexStatus, QuestionDocument, QuestionSummary, ScoredQuestion, document_key,
    group_prefix,
};
use crate::modules::hotspot::core::similarity::cosine_similarity;

#[derive(Default)]
pub struct InMemoryQuestionStore {
    documents: RwLock<BTreeMap<String, QuestionDocument>>,
    indexes: RwLock<HashSet<String>>,
    is_offline: bool,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Question store offline".into()));
        }
        Ok(())
    }

    async fn check_index(&self, group_id: &str) -> Result<(), StoreError> {
        if !self.indexes.read().await.contains(group_id) {
            return Err(StoreError::IndexMissing(group_id.to_string()));
        }
        Ok(())
    }

    fn in_group<'a>(
        documents: &'a BTreeMap<String, QuestionDocument>,
        group_id: &str,
    ) -> impl Iterator<Item = (&'a String, &'a QuestionDocument)> {
        let prefix = group_prefix(group_id);
        documents
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn ensure_index(&self, group_id: &str) -> Result<bool, StoreError> {
        self.check_online()?;
        Ok(self.indexes.write().await.insert(group_id.to_string()))
    }

    async fn rebuild_index(&self, group_id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        self.indexes.write().await.insert(group_id.to_string());
        Ok(())
    }

    async fn get(
        &self,
        group_id: &str,
        question_id: &str,
    ) -> Result<Option<QuestionDocument>, StoreError> {
        self.check_online()?;
        Ok(self
            .documents
            .read()
            .await
            .get(&document_key(group_id, question_id))
            .cloned())
    }

    async fn put(&self, group_id: &str, document: &QuestionDocument) -> Result<(), StoreError> {
        self.check_online()?;
        self.documents.write().await.insert(
            document_key(group_id, &document.question_id),
            document.clone(),
        );
        Ok(())
    }

    async fn delete(&self, group_id: &str, question_id: &str) -> Result<bool, StoreError> {
        self.check_online()?;
        Ok(self
            .documents
            .write()
            .await
            .remove(&document_key(group_id, question_id))
            .is_some())
    }

    async fn delete_by_category(&self, group_id: &str, category: &str) -> Result<u64, StoreError> {
        self.check_online()?;
        self.check_index(group_id).await?;
        let mut documents = self.documents.write().await;
        let doomed: Vec<String> = Self::in_group(&documents, group_id)
            .filter(|(_, document)| document.category == category)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            documents.remove(key);
        }
        Ok(doomed.len() as u64)
    }

    async fn list(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<QuestionSummary>, StoreError> {
        self.check_online()?;
        self.check_index(group_id).await?;
        let documents = self.documents.read().await;
        Ok(Self::in_group(&documents, group_id)
            .take(limit)
            .map(|(key, document)| QuestionSummary {
                key: key.clone(),
                question_id: document.question_id.clone(),
                question: document.question.clone(),
                standard_reply: document.standard_reply.clone(),
                category: document.category.clone(),
            })
            .collect())
    }

    async fn search(
        &self,
        group_id: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredQuestion>, StoreError> {
        self.check_online()?;
        self.check_index(group_id).await?;
        let documents = self.documents.read().await;
        let mut hits: Vec<ScoredQuestion> = Self::in_group(&documents, group_id)
            .map(|(key, document)| ScoredQuestion {
                key: key.clone(),
                question_id: document.question_id.clone(),
                question: document.question.clone(),
                standard_reply: document.standard_reply.clone(),
                category: document.category.clone(),
                similarity_score: cosine_similarity(vector, &document.query_vector),
            })
            .collect();
        hits.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn stats(&self, group_id: &str) -> Result<GroupStats, StoreError> {
        self.check_online()?;
        if self.check_index(group_id).await.is_err() {
            return Ok(GroupStats::missing(group_id));
        }
        let documents = self.documents.read().await;
        let mut categories = BTreeMap::new();
        let mut total_questions = 0;
        for (_, document) in Self::in_group(&documents, group_id) {
            total_questions += 1;
            *categories.entry(document.category.clone()).or_insert(0) += 1;
        }
        Ok(GroupStats {
            group_id: group_id.to_string(),
            total_questions,
            categories,
            index_status: IndexStatus::Active,
        })
    }
}
