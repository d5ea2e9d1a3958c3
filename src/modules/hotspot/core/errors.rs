use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::modules::hotspot::core::ports::{EmbeddingError, StoreError};
use crate::shared::core::api_response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("question {0} already exists")]
    AlreadyExists(String),

    #[error("questions already exist: {}", .0.join(", "))]
    AlreadyExistMany(Vec<String>),

    #[error("question {0} does not exist")]
    NotFound(String),

    #[error("invalid request: {0}")]
    Invalid(String),
}

impl ApplicationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::AlreadyExists(_) | Self::AlreadyExistMany(_) | Self::Invalid(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Embedding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the failure at a level matching its status and renders the envelope.
    pub fn into_api_response(self, operation: &str) -> Response {
        if self.status().is_server_error() {
            tracing::error!(operation, error = %self, "request failed");
        } else {
            tracing::warn!(operation, error = %self, "request rejected");
        }
        ApiResponse::<()>::from(self).into_response()
    }
}

impl<T> From<ApplicationError> for ApiResponse<T> {
    fn from(error: ApplicationError) -> Self {
        ApiResponse::error(error.status(), error.to_string())
    }
}
