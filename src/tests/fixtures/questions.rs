use crate::modules::hotspot::core::question::QuestionDocument;
use crate::modules::hotspot::use_cases::add_question::command::AddQuestion;

pub const TEST_DIMENSION: usize = 64;

pub struct AddQuestionBuilder {
    inner: AddQuestion,
}

impl AddQuestionBuilder {
    pub fn new() -> Self {
        Self {
            inner: AddQuestion {
                question_id: "q-0001".to_string(),
                question: "How do I reset my password?".to_string(),
                standard_reply: "Use the reset link on the login page.".to_string(),
                related_links: vec!["https://example.com/reset".to_string()],
                category: "account".to_string(),
            },
        }
    }

    pub fn question_id(mut self, v: impl Into<String>) -> Self {
        self.inner.question_id = v.into();
        self
    }

    pub fn question(mut self, v: impl Into<String>) -> Self {
        self.inner.question = v.into();
        self
    }

    pub fn category(mut self, v: impl Into<String>) -> Self {
        self.inner.category = v.into();
        self
    }

    pub fn build(self) -> AddQuestion {
        self.inner
    }
}

/// A stored document with a hand picked vector.
pub fn make_question_document(
    question_id: &str,
    category: &str,
    query_vector: Vec<f32>,
) -> QuestionDocument {
    QuestionDocument {
        question_id: question_id.to_string(),
        question: format!("Question {question_id}"),
        standard_reply: format!("Reply {question_id}"),
        related_links: vec![],
        category: category.to_string(),
        query_vector,
        created_at: "2025-01-01T00:00:00.000Z".to_string(),
        updated_at: "2025-01-01T00:00:00.000Z".to_string(),
    }
}
