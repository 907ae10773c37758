use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id stored in the session; the client is not logged in.
    #[error("User not found in session")]
    UserNotInSession,

    /// Session references a user id that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// User is authenticated but lacks the permission for the operation.
    ///
    /// The message is logged only; the client receives a generic denial.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),

    /// CSRF state in the OAuth callback does not match the session value.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// No CSRF state stored in the session when the callback arrived.
    #[error("Failed to login user due to missing CSRF state in session")]
    CsrfMissingValue,

    /// Exchanging the authorization code with the identity provider failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
/// - `CsrfValidationFailed` / `CsrfMissingValue` → 400 Bad Request
/// - `TokenExchange` → 500 Internal Server Error
///
/// Details are logged at debug level; client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in")
            }
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You don't have permission to perform this action",
            ),
            Self::CsrfValidationFailed | Self::CsrfMissingValue => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::TokenExchange(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
