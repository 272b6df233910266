use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned with every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with ID {0} not found.")]
    NotFound(i32),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    InvalidPath(#[from] PathRejection),

    #[error("Database error while {action}: {source}")]
    Database {
        action: String,
        #[source]
        source: DbErr,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Wrap a storage fault with the operation that hit it
    pub fn database(action: impl Into<String>) -> impl FnOnce(DbErr) -> Self {
        let action = action.into();
        move |source| Self::Database { action, source }
    }
}

/// JSON error body for user and login endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    /// Underlying fault text, present on 500 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    fn internal(detail: String) -> Self {
        Self {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            detail: Some(detail),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            UserError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorBody::message(self.to_string())),
            UserError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, ErrorBody::message(self.to_string()))
            }
            UserError::InvalidBody(rejection) => {
                return AppError::JsonExtractorRejection(rejection).into_response();
            }
            UserError::InvalidPath(rejection) => {
                return AppError::PathExtractorRejection(rejection).into_response();
            }
            UserError::Database { source, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(source.to_string()),
            ),
            UserError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::internal(detail),
            ),
        };

        (status, Json(body)).into_response()
    }
}
