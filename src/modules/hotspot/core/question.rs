use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_CATEGORY: &str = "general";

pub fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// RFC 3339 timestamp used for `created_at` and `updated_at`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Storage key of a question inside its group.
pub fn document_key(group_id: &str, question_id: &str) -> String {
    format!("{group_id}:{question_id}")
}

/// Key prefix covered by the group's index.
pub fn group_prefix(group_id: &str) -> String {
    format!("{group_id}:")
}

/// A hotspot question as persisted, embedding included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDocument {
    pub question_id: String,
    pub question: String,
    pub standard_reply: String,
    #[serde(default)]
    pub related_links: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    pub query_vector: Vec<f32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub question_id: String,
    pub question: String,
    pub standard_reply: String,
    pub related_links: Vec<String>,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<QuestionDocument> for QuestionView {
    fn from(document: QuestionDocument) -> Self {
        Self {
            question_id: document.question_id,
            question: document.question,
            standard_reply: document.standard_reply,
            related_links: document.related_links,
            category: document.category,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub key: String,
    pub question_id: String,
    pub question: String,
    pub standard_reply: String,
    pub category: String,
}

/// A search hit. `similarity_score` is `1 - cosine distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuestion {
    pub key: String,
    pub question_id: String,
    pub question: String,
    pub standard_reply: String,
    pub category: String,
    pub similarity_score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Active,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub group_id: String,
    pub total_questions: u64,
    pub categories: BTreeMap<String, u64>,
    pub index_status: IndexStatus,
}

impl GroupStats {
    pub fn missing(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            total_questions: 0,
            categories: BTreeMap::new(),
            index_status: IndexStatus::Missing,
        }
    }
}
