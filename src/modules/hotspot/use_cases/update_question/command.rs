use crate::modules::hotspot::core::errors::ApplicationError;
use crate::modules::hotspot::core::question::QuestionDocument;
use crate::modules::hotspot::core::validation::{
    require_text, validate_category, validate_question_id,
};

/// Partial update: `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateQuestion {
    pub question_id: String,
    pub question: Option<String>,
    pub standard_reply: Option<String>,
    pub related_links: Option<Vec<String>>,
    pub category: Option<String>,
}

impl UpdateQuestion {
    pub fn validate(&self) -> Result<(), ApplicationError> {
        validate_question_id(&self.question_id)?;
        if let Some(question) = &self.question {
            require_text("question", question)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        Ok(())
    }

    /// The new question text, when it differs from the stored one.
    pub fn changed_question<'a>(&'a self, current: &QuestionDocument) -> Option<&'a str> {
        self.question
            .as_deref()
            .filter(|question| *question != current.question)
    }

    pub fn apply(self, document: &mut QuestionDocument, timestamp: &str) {
        if let Some(question) = self.question {
            document.question = question;
        }
        if let Some(standard_reply) = self.standard_reply {
            document.standard_reply = standard_reply;
        }
        if let Some(related_links) = self.related_links {
            document.related_links = related_links;
        }
        if let Some(category) = self.category {
            document.category = category;
        }
        document.updated_at = timestamp.to_string();
    }
}

#[cfg(test)]
mod update_question_command_tests {
    use super::*;
    use crate::tests::fixtures::questions::make_question_document;
    use rstest::rstest;

    #[rstest]
    fn it_should_only_touch_provided_fields() {
        let mut document = make_question_document("q-1", "account", vec![1.0, 0.0]);
        let command = UpdateQuestion {
            question_id: "q-1".into(),
            standard_reply: Some("New reply".into()),
            ..Default::default()
        };

        command.apply(&mut document, "2025-06-01T00:00:00.000Z");

        assert_eq!(document.question, "Question q-1");
        assert_eq!(document.standard_reply, "New reply");
        assert_eq!(document.category, "account");
        assert_eq!(document.created_at, "2025-01-01T00:00:00.000Z");
        assert_eq!(document.updated_at, "2025-06-01T00:00:00.000Z");
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some("Question q-1"), false)]
    #[case(Some("Something else"), true)]
    fn it_should_detect_a_changed_question(#[case] question: Option<&str>, #[case] changed: bool) {
        let document = make_question_document("q-1", "account", vec![]);
        let command = UpdateQuestion {
            question_id: "q-1".into(),
            question: question.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(command.changed_question(&document).is_some(), changed);
    }

    #[rstest]
    #[case("  ")]
    #[case("售后,退款")]
    #[case(" billing")]
    fn it_should_reject_an_invalid_category(#[case] category: &str) {
        let command = UpdateQuestion {
            question_id: "q-1".into(),
            category: Some(category.into()),
            ..Default::default()
        };
        assert!(matches!(command.validate(), Err(ApplicationError::Invalid(_))));
    }
}
