use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        live_game::{LiveGameDto, UpdateLiveGameDto},
        session::{CreateGameSessionDto, GameSessionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{game_session::CreateGameSessionParam, live_game::LiveGamePatch},
        service::{game_session::GameSessionService, lifecycle::SessionLifecycleService},
        state::AppState,
    },
};

/// Tag for grouping session endpoints in OpenAPI documentation
pub static SESSION_TAG: &str = "session";

/// Create an `INACTIVE` session for a campaign.
///
/// # Access Control
/// - `CampaignHost` - Only the campaign host schedules sessions
///
/// # Returns
/// - `201 Created` - The new session
/// - `400 Bad Request` - Capacity outside 1..=32
/// - `403 Forbidden` - Not the campaign host
#[utoipa::path(
    post,
    path = "/api/campaigns/{campaign_id}/sessions",
    tag = SESSION_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    request_body = CreateGameSessionDto,
    responses(
        (status = 201, description = "Successfully created session", body = GameSessionDto),
        (status = 400, description = "Invalid capacity", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the campaign host", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
    Json(payload): Json<CreateGameSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CampaignHost(campaign_id)])
        .await?;

    let game_session = GameSessionService::new(&state.db)
        .create(CreateGameSessionParam::from_dto(campaign_id, user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(game_session.into_dto())))
}

/// List the sessions of a campaign.
///
/// # Access Control
/// - `CampaignMember` - Host or joined player of the campaign
///
/// # Arguments
/// - `campaign_id` - Campaign whose sessions are listed
///
/// # Returns
/// - `200 OK` - Sessions with their rosters, oldest first
/// - `403 Forbidden` - Not a member of the campaign
#[utoipa::path(
    get,
    path = "/api/campaigns/{campaign_id}/sessions",
    tag = SESSION_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Sessions of the campaign", body = Vec<GameSessionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the campaign", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_sessions(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CampaignMember(campaign_id)])
        .await?;

    let sessions = GameSessionService::new(&state.db)
        .list_by_campaign(campaign_id)
        .await?;

    let dtos: Vec<GameSessionDto> = sessions.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a single session with its roster.
///
/// # Access Control
/// - `SessionMember` - Host or joined player of the session's campaign
///
/// # Arguments
/// - `session_id` - Session to fetch
///
/// # Returns
/// - `200 OK` - The session
/// - `404 Not Found` - Session does not exist
#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session", body = GameSessionDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the campaign", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SessionMember(session_id)])
        .await?;

    let game_session = GameSessionService::new(&state.db).get(session_id).await?;

    Ok((StatusCode::OK, Json(game_session.into_dto())))
}

/// Delete an `INACTIVE` session.
#[utoipa::path(
    delete,
    path = "/api/sessions/{session_id}",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 400, description = "Session is not INACTIVE", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the session host", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_session(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SessionHost(session_id)])
        .await?;

    GameSessionService::new(&state.db).delete(session_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join the session roster as a campaign player.
#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/join",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Joined", body = GameSessionDto),
        (status = 400, description = "Already joined, session full or user is the host", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the campaign", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_session(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SessionMember(session_id)])
        .await?;

    let game_session = GameSessionService::new(&state.db)
        .join(session_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(game_session.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/leave",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Left the session", body = GameSessionDto),
        (status = 400, description = "Not on the roster", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_session(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game_session = GameSessionService::new(&state.db)
        .leave(session_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(game_session.into_dto())))
}

/// Start a session: copy the campaign configuration into a new live game.
///
/// Fails with 400 unless the session is `INACTIVE` and no other session of the
/// campaign is in progress. A failure of the live-game service rolls the session back
/// to `INACTIVE` and returns 500.
#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/start",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session is ACTIVE", body = GameSessionDto),
        (status = 400, description = "Session not INACTIVE or campaign busy", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the session host", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Live-game service failure", body = ErrorDto)
    ),
)]
pub async fn start_session(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game_session =
        SessionLifecycleService::new(&state.db, &*state.live_games, &state.notifications)
            .start(session_id, user.id)
            .await?;

    Ok((StatusCode::OK, Json(game_session.into_dto())))
}

/// End a session: write the live configuration back into the campaign.
///
/// Calling it on a `STOPPING` session resumes an interrupted end.
#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/end",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session is INACTIVE", body = GameSessionDto),
        (status = 400, description = "Session not ACTIVE or invalid seating", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the session host", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Live-game service failure", body = ErrorDto)
    ),
)]
pub async fn end_session(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let game_session =
        SessionLifecycleService::new(&state.db, &*state.live_games, &state.notifications)
            .end(session_id, user.id)
            .await?;

    Ok((StatusCode::OK, Json(game_session.into_dto())))
}

/// Read the live state of a session that is not `INACTIVE`.
///
/// # Access Control
/// - `SessionMember` - Host or joined player of the session's campaign
///
/// # Arguments
/// - `session_id` - Session whose live game is read
///
/// # Returns
/// - `200 OK` - Current live game document
/// - `400 Bad Request` - Session is `INACTIVE`
/// - `404 Not Found` - Session or live game document missing
#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}/live",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Live game state", body = LiveGameDto),
        (status = 400, description = "Session is INACTIVE", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the campaign", body = ErrorDto),
        (status = 404, description = "Session or live game not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_live_state(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SessionMember(session_id)])
        .await?;

    let live_game =
        SessionLifecycleService::new(&state.db, &*state.live_games, &state.notifications)
            .live_state(session_id)
            .await?;

    Ok((StatusCode::OK, Json(live_game.into_dto())))
}

/// Patch the live state of an `ACTIVE` session (host only).
///
/// A replacement seating may only list the host and campaign players, each once, and
/// no more players than the session capacity.
#[utoipa::path(
    patch,
    path = "/api/sessions/{session_id}/live",
    tag = SESSION_TAG,
    params(
        ("session_id" = i32, Path, description = "Session ID")
    ),
    request_body = UpdateLiveGameDto,
    responses(
        (status = 200, description = "Updated live game state", body = LiveGameDto),
        (status = 400, description = "Session not ACTIVE or invalid seating", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the session host", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Live-game service failure", body = ErrorDto)
    ),
)]
pub async fn update_live_state(
    State(state): State<AppState>,
    session: Session,
    Path(session_id): Path<i32>,
    Json(payload): Json<UpdateLiveGameDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let live_game =
        SessionLifecycleService::new(&state.db, &*state.live_games, &state.notifications)
            .update_live_state(session_id, user.id, LiveGamePatch::from(payload))
            .await?;

    Ok((StatusCode::OK, Json(live_game.into_dto())))
}
