use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vidtube_application::{
    ChangePasswordError, ChannelProfileError, CurrentUserError, DeleteAccountError, LoginError,
    LogoutError, RefreshError, RegisterError, SessionError, UpdateAccountError, UpdateMediaError,
    WatchHistoryError,
};
use vidtube_core::{MediaStoreError, TokenError, UserError, UserStoreError};

use crate::auth::TokenAuthError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Upstream(detail) => {
                tracing::error!(%detail, "Upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "Media service is unavailable".to_string(),
                )
            }
            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "Unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            status_code: status_code.as_u16(),
            message,
            success: false,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Validation(error.body_text())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::Conflict(error.to_string()),
            UserStoreError::UserNotFound => ApiError::NotFound("User does not exist".to_string()),
            UserStoreError::UnexpectedError(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<MediaStoreError> for ApiError {
    fn from(error: MediaStoreError) -> Self {
        ApiError::Upstream(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid => ApiError::Unauthorized(error.to_string()),
            TokenError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken | TokenAuthError::InvalidToken => {
                ApiError::Unauthorized(error.to_string())
            }
            TokenAuthError::UnexpectedError(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::UserStoreError(e) => e.into(),
            SessionError::TokenError(e) => e.into(),
            SessionError::Superseded => ApiError::Unauthorized(error.to_string()),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Validation(e) => e.into(),
            RegisterError::UsernameTaken
            | RegisterError::EmailTaken
            | RegisterError::AlreadyExists => ApiError::Conflict(error.to_string()),
            RegisterError::AvatarUpload(_) | RegisterError::CoverImageUpload(_) => {
                ApiError::Upstream(error.to_string())
            }
            RegisterError::Persistence(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => ApiError::NotFound(error.to_string()),
            LoginError::InvalidCredentials => ApiError::Unauthorized(error.to_string()),
            LoginError::UserStoreError(e) => e.into(),
            LoginError::SessionError(e) => e.into(),
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidToken => ApiError::Unauthorized(error.to_string()),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::SessionError(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::InvalidCredentials => ApiError::Unauthorized(error.to_string()),
            ChangePasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<CurrentUserError> for ApiError {
    fn from(error: CurrentUserError) -> Self {
        match error {
            CurrentUserError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateAccountError> for ApiError {
    fn from(error: UpdateAccountError) -> Self {
        match error {
            UpdateAccountError::EmailTaken => ApiError::Conflict(error.to_string()),
            UpdateAccountError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateMediaError> for ApiError {
    fn from(error: UpdateMediaError) -> Self {
        match error {
            UpdateMediaError::Validation(e) => e.into(),
            UpdateMediaError::Upload(e) => e.into(),
            UpdateMediaError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ChannelProfileError> for ApiError {
    fn from(error: ChannelProfileError) -> Self {
        match error {
            ChannelProfileError::ChannelNotFound => ApiError::NotFound(error.to_string()),
            ChannelProfileError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<WatchHistoryError> for ApiError {
    fn from(error: WatchHistoryError) -> Self {
        match error {
            WatchHistoryError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::UserStoreError(e) => e.into(),
        }
    }
}
