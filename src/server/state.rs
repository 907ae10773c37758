//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into each handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection and HTTP
//! client are pools, the live game store and notification hub are reference counted.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::service::{live_game::LiveGameStore, notification::NotificationHub};

/// OAuth2 client with the authorization and token endpoints configured.
pub type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Cold store connection pool.
    pub db: DatabaseConnection,

    /// HTTP client for the identity provider (redirects disabled).
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// Userinfo endpoint of the identity provider.
    pub userinfo_url: String,

    /// Hot store holding live game documents.
    pub live_games: Arc<dyn LiveGameStore>,

    /// Open WebSocket connections per user.
    pub notifications: NotificationHub,

    /// Application base URL, used for post-login redirects.
    pub app_url: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        userinfo_url: String,
        live_games: Arc<dyn LiveGameStore>,
        notifications: NotificationHub,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            userinfo_url,
            live_games,
            notifications,
            app_url,
        }
    }
}
