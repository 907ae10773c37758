use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::game_session::SessionStatus};

/// Rule violations around the session lifecycle and roster.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The requested edge is not in the transition table.
    #[error("Session cannot move from {from} to {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    /// A transition carried a live game reference inconsistent with its target state.
    ///
    /// Live states require a reference, `INACTIVE` forbids one.
    #[error("Session in {status} {}", reference_rule(.has_reference))]
    LiveGameReferenceMismatch {
        status: SessionStatus,
        has_reference: bool,
    },

    /// The stored status changed between read and guarded update.
    #[error("Session {session_id} is no longer {expected}")]
    StatusConflict {
        session_id: i32,
        expected: SessionStatus,
    },

    /// The operation needs the session in a specific state.
    #[error("Session {session_id} is {actual}, expected {expected}")]
    WrongStatus {
        session_id: i32,
        expected: SessionStatus,
        actual: SessionStatus,
    },

    /// Another session of the campaign is outside `INACTIVE`.
    #[error("Campaign {0} already has a session in progress")]
    CampaignBusy(i32),

    /// The roster or seating would exceed the session capacity.
    #[error("Session {session_id} is full ({capacity} players)")]
    AtCapacity { session_id: i32, capacity: i32 },

    /// Capacity outside the accepted range.
    #[error("Capacity must be between {min} and {max}, got {value}")]
    InvalidCapacity { value: i32, min: i32, max: i32 },

    /// User already on the roster.
    #[error("User {user_id} already joined session {session_id}")]
    AlreadyJoined { session_id: i32, user_id: i32 },

    /// User not on the roster.
    #[error("User {user_id} has not joined session {session_id}")]
    NotJoined { session_id: i32, user_id: i32 },
}

fn reference_rule(has_reference: &bool) -> &'static str {
    if *has_reference {
        "must not carry a live game reference"
    } else {
        "requires a live game reference"
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::LiveGameReferenceMismatch { .. } => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            err => {
                tracing::debug!("{}", err);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
