use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Envelope shared by every hotspot endpoint.
///
/// `code` always mirrors the HTTP status line of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub code: u16,
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::error(StatusCode::UNPROCESSABLE_ENTITY, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub fn json_rejected(rejection: JsonRejection) -> Response {
    ApiResponse::<()>::unprocessable(rejection.body_text()).into_response()
}

pub fn query_rejected(rejection: QueryRejection) -> Response {
    ApiResponse::<()>::bad_request(rejection.body_text()).into_response()
}

pub fn path_rejected(rejection: PathRejection) -> Response {
    ApiResponse::<()>::bad_request(rejection.body_text()).into_response()
}
