use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::question::QuestionDocument;
use crate::modules::hotspot::core::validation::{
    require_text, validate_category, validate_question_id,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AddQuestion {
    pub question_id: String,
    pub question: String,
    pub standard_reply: String,
    pub related_links: Vec<String>,
    pub category: String,
}

impl AddQuestion {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        validate_question_id(&self.question_id)?;
        require_text("question", &self.question)?;
        validate_category(&self.category)
    }

    pub fn into_document(self, query_vector: Vec<f32>, timestamp: &str) -> QuestionDocument {
        QuestionDocument {
            question_id: self.question_id,
            question: self.question,
            standard_reply: self.standard_reply,
            related_links: self.related_links,
            category: self.category,
            query_vector,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }
}
