use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::ErrorDto,
        campaign::{
            CampaignDto, CampaignPlayerDto, CreateCampaignDto, InvitePlayerDto, UpdateCampaignDto,
        },
        live_game::{LiveGameDto, SeatDto, UpdateLiveGameDto},
        notification::NotificationDto,
        session::{CreateGameSessionDto, GameSessionDto},
        user::UserDto,
    },
    server::{
        config::Config,
        controller::{
            auth::{self, callback, get_user, login, logout, AUTH_TAG},
            campaign::{
                self, accept_invite, create_campaign, delete_campaign, get_campaign,
                get_campaigns, invite_player, remove_player, update_campaign, CAMPAIGN_TAG,
            },
            notification::{self, ws_handler, NOTIFICATION_TAG},
            session::{
                self, create_session, delete_session, end_session, get_live_state, get_session,
                get_sessions, join_session, leave_session, start_session, update_live_state,
                SESSION_TAG,
            },
        },
        error::{config::ConfigError, AppError},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::callback,
        auth::logout,
        auth::get_user,
        campaign::create_campaign,
        campaign::get_campaigns,
        campaign::get_campaign,
        campaign::update_campaign,
        campaign::delete_campaign,
        campaign::invite_player,
        campaign::accept_invite,
        campaign::remove_player,
        session::create_session,
        session::get_sessions,
        session::get_session,
        session::delete_session,
        session::join_session,
        session::leave_session,
        session::start_session,
        session::end_session,
        session::get_live_state,
        session::update_live_state,
        notification::ws_handler,
    ),
    components(schemas(
        ErrorDto,
        UserDto,
        CampaignDto,
        CampaignPlayerDto,
        CreateCampaignDto,
        UpdateCampaignDto,
        InvitePlayerDto,
        GameSessionDto,
        CreateGameSessionDto,
        LiveGameDto,
        SeatDto,
        UpdateLiveGameDto,
        NotificationDto,
    )),
    tags(
        (name = AUTH_TAG, description = "Login through the identity provider"),
        (name = CAMPAIGN_TAG, description = "Campaigns and their players"),
        (name = SESSION_TAG, description = "Sessions, their lifecycle and live state"),
        (name = NOTIFICATION_TAG, description = "Per-user WebSocket notifications"),
    )
)]
pub struct ApiDoc;

/// Builds the API router with CORS restricted to the application origin.
///
/// # Returns
/// - `Ok(Router)` - All API routes plus Swagger UI at `/api/docs`
/// - `Err(AppError::ConfigErr)` - `APP_URL` is not a valid header value
pub fn router(config: &Config) -> Result<Router<AppState>, AppError> {
    let origin = HeaderValue::from_str(config.app_url.trim_end_matches('/')).map_err(|_| {
        ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: "not a valid origin".to_string(),
        }
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let api = Router::new()
        .route("/api/auth/login", get(login))
        .route("/api/auth/callback", get(callback))
        .route("/api/auth/logout", get(logout))
        .route("/api/auth/user", get(get_user))
        .route("/api/campaigns", get(get_campaigns).post(create_campaign))
        .route(
            "/api/campaigns/{campaign_id}",
            get(get_campaign)
                .put(update_campaign)
                .delete(delete_campaign),
        )
        .route("/api/campaigns/{campaign_id}/players", post(invite_player))
        .route(
            "/api/campaigns/{campaign_id}/players/accept",
            post(accept_invite),
        )
        .route(
            "/api/campaigns/{campaign_id}/players/{user_id}",
            delete(remove_player),
        )
        .route(
            "/api/campaigns/{campaign_id}/sessions",
            get(get_sessions).post(create_session),
        )
        .route(
            "/api/sessions/{session_id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/sessions/{session_id}/join", post(join_session))
        .route("/api/sessions/{session_id}/leave", post(leave_session))
        .route("/api/sessions/{session_id}/start", post(start_session))
        .route("/api/sessions/{session_id}/end", post(end_session))
        .route(
            "/api/sessions/{session_id}/live",
            get(get_live_state).patch(update_live_state),
        )
        .route("/api/ws", get(ws_handler))
        .layer(cors);

    Ok(api.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi())))
}
