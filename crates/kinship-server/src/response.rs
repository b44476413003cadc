//! Response envelope and error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kinship_core::{Error, Violation};
use serde::Serialize;

/// JSON body returned by every API route
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Violation>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            errors: None,
        }
    }
}

/// A failed request, rendered as an `ApiResponse` with `success: false`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<Vec<Violation>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Map a service error, using `Failed to {action}` for internal failures.
    ///
    /// Used as `.map_err(ApiError::context("fetch persons"))`.
    pub fn context(action: &'static str) -> impl FnOnce(Error) -> Self {
        move |err| Self::from_error(err, action)
    }

    fn from_error(err: Error, action: &str) -> Self {
        match err {
            Error::PersonNotFound(_) => Self::new(StatusCode::NOT_FOUND, "Person not found"),
            Error::ParentNotFound(_) => Self::new(StatusCode::NOT_FOUND, "Parent person not found"),
            Error::RelationshipNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Parent relationship not found")
            }
            Error::MissingParentId => Self::new(StatusCode::BAD_REQUEST, "parentId is required"),
            Error::Validation(errors) => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            other => {
                tracing::error!("Failed to {}: {}", action, other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to {}", action))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}
