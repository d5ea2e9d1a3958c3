use crate::modules::hotspot::core::errors::ApplicationError;

pub const MAX_GROUP_ID_LEN: usize = 64;
pub const MAX_QUESTION_ID_LEN: usize = 128;

/// Group ids name an index and a key prefix, so they stay within `[A-Za-z0-9_-]`.
pub fn validate_group_id(group_id: &str) -> Result<(), ApplicationError> {
    if group_id.is_empty() {
        return Err(ApplicationError::invalid("group_id must not be empty"));
    }
    if group_id.len() > MAX_GROUP_ID_LEN {
        return Err(ApplicationError::invalid(format!(
            "group_id must be at most {MAX_GROUP_ID_LEN} characters"
        )));
    }
    if !group_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApplicationError::invalid(
            "group_id may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

pub fn validate_question_id(question_id: &str) -> Result<(), ApplicationError> {
    if question_id.trim().is_empty() {
        return Err(ApplicationError::invalid("question_id must not be empty"));
    }
    if question_id.chars().count() > MAX_QUESTION_ID_LEN {
        return Err(ApplicationError::invalid(format!(
            "question_id must be at most {MAX_QUESTION_ID_LEN} characters"
        )));
    }
    if question_id.contains(':') {
        return Err(ApplicationError::invalid("question_id must not contain ':'"));
    }
    Ok(())
}

pub fn require_text(field: &str, value: &str) -> Result<(), ApplicationError> {
    if value.trim().is_empty() {
        return Err(ApplicationError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Categories are indexed as single TAG values, so they may not contain the
/// tag separator or carry surrounding whitespace that the index would trim.
pub fn validate_category(category: &str) -> Result<(), ApplicationError> {
    require_text("category", category)?;
    if category.contains(',') {
        return Err(ApplicationError::invalid("category must not contain ','"));
    }
    if category.trim() != category {
        return Err(ApplicationError::invalid(
            "category must not start or end with whitespace",
        ));
    }
    Ok(())
}

pub fn validate_limit(field: &str, limit: usize, max: usize) -> Result<(), ApplicationError> {
    if limit == 0 || limit > max {
        return Err(ApplicationError::invalid(format!(
            "{field} must be between 1 and {max}"
        )));
    }
    Ok(())
}
