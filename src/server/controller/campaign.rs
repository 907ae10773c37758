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
        campaign::{
            CampaignDto, CampaignPlayerDto, CreateCampaignDto, InvitePlayerDto, UpdateCampaignDto,
        },
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::campaign::{CreateCampaignParam, UpdateCampaignParam},
        service::campaign::CampaignService,
        state::AppState,
    },
};

/// Tag for grouping campaign endpoints in OpenAPI documentation
pub static CAMPAIGN_TAG: &str = "campaign";

/// Create a campaign hosted by the logged-in user.
///
/// Configuration blobs missing from the payload default to empty objects.
///
/// # Returns
/// - `201 Created` - The new campaign
/// - `401 Unauthorized` - Not logged in
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/campaigns",
    tag = CAMPAIGN_TAG,
    request_body = CreateCampaignDto,
    responses(
        (status = 201, description = "Successfully created campaign", body = CampaignDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCampaignDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let campaign = CampaignService::new(&state.db, &state.notifications)
        .create(CreateCampaignParam::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(campaign.into_dto())))
}

/// List campaigns the logged-in user hosts or plays in.
#[utoipa::path(
    get,
    path = "/api/campaigns",
    tag = CAMPAIGN_TAG,
    responses(
        (status = 200, description = "Campaigns of the user", body = Vec<CampaignDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_campaigns(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let campaigns = CampaignService::new(&state.db, &state.notifications)
        .list_for_user(user.id)
        .await?;

    let dtos: Vec<CampaignDto> = campaigns.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/campaigns/{campaign_id}",
    tag = CAMPAIGN_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign", body = CampaignDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the campaign", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CampaignMember(campaign_id)])
        .await?;

    let campaign = CampaignService::new(&state.db, &state.notifications)
        .get(campaign_id)
        .await?;

    Ok((StatusCode::OK, Json(campaign.into_dto())))
}

/// Update name, description or configuration of a campaign.
///
/// Rejected with 400 while any session of the campaign is live.
#[utoipa::path(
    put,
    path = "/api/campaigns/{campaign_id}",
    tag = CAMPAIGN_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    request_body = UpdateCampaignDto,
    responses(
        (status = 200, description = "Updated campaign", body = CampaignDto),
        (status = 400, description = "A session of the campaign is in progress", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the campaign host", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
    Json(payload): Json<UpdateCampaignDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CampaignHost(campaign_id)])
        .await?;

    let campaign = CampaignService::new(&state.db, &state.notifications)
        .update(campaign_id, UpdateCampaignParam::from(payload))
        .await?;

    Ok((StatusCode::OK, Json(campaign.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/campaigns/{campaign_id}",
    tag = CAMPAIGN_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 400, description = "A session of the campaign is in progress", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the campaign host", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_campaign(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CampaignHost(campaign_id)])
        .await?;

    CampaignService::new(&state.db, &state.notifications)
        .delete(campaign_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Invite a user to the campaign. The invited user is notified over WebSocket.
#[utoipa::path(
    post,
    path = "/api/campaigns/{campaign_id}/players",
    tag = CAMPAIGN_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    request_body = InvitePlayerDto,
    responses(
        (status = 201, description = "Invite created", body = CampaignPlayerDto),
        (status = 400, description = "User is the host or already part of the campaign", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the campaign host", body = ErrorDto),
        (status = 404, description = "Campaign or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn invite_player(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
    Json(payload): Json<InvitePlayerDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::CampaignHost(campaign_id)])
        .await?;

    let player = CampaignService::new(&state.db, &state.notifications)
        .invite(campaign_id, payload.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(player.into_dto())))
}

/// Accept the logged-in user's pending invite.
#[utoipa::path(
    post,
    path = "/api/campaigns/{campaign_id}/players/accept",
    tag = CAMPAIGN_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Invite accepted", body = CampaignPlayerDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No pending invite", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_invite(
    State(state): State<AppState>,
    session: Session,
    Path(campaign_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let player = CampaignService::new(&state.db, &state.notifications)
        .accept_invite(campaign_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(player.into_dto())))
}

/// Remove a player from the campaign.
///
/// The host may remove anyone; a player may only remove themselves (leave or decline).
#[utoipa::path(
    delete,
    path = "/api/campaigns/{campaign_id}/players/{user_id}",
    tag = CAMPAIGN_TAG,
    params(
        ("campaign_id" = i32, Path, description = "Campaign ID"),
        ("user_id" = i32, Path, description = "User ID of the player")
    ),
    responses(
        (status = 204, description = "Player removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Neither the host nor the player", body = ErrorDto),
        (status = 404, description = "Campaign not found or user not part of it", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_player(
    State(state): State<AppState>,
    session: Session,
    Path((campaign_id, user_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = CampaignService::new(&state.db, &state.notifications);
    let campaign = service.get(campaign_id).await?;

    if !campaign.is_host(user.id) && user.id != user_id {
        return Err(AuthError::AccessDenied(
            user.id,
            format!(
                "User attempted to remove player {} from campaign {} without hosting it",
                user_id, campaign_id
            ),
        )
        .into());
    }

    service.remove_player(campaign_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
