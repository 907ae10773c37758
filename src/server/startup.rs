use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::live_game::{HttpLiveGameStore, InMemoryLiveGameStore, LiveGameStore},
    state::OAuth2Client,
};

/// Initializes the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info` for this crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the PostgreSQL database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    connect_to_database_url(&config.database_url).await
}

/// Same as [`connect_to_database`] for callers that only have a URL.
pub async fn connect_to_database_url(database_url: &str) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the `tower_sessions` table in PostgreSQL.
///
/// Sessions expire after seven days of inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    let pool = db.get_postgres_connection_pool().clone();
    let session_store = PostgresStore::new(pool);

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session_layer)
}

/// Builds the HTTP client used for identity provider and live-game requests.
///
/// Redirects are disabled so a compromised endpoint cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client for the configured identity provider.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorization, token and redirect URLs set
/// - `Err(AppError::ConfigErr)` - One of the configured URLs does not parse
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, err: url::ParseError| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: err.to_string(),
    };

    let auth_url = AuthUrl::new(config.oauth_auth_url.clone())
        .map_err(|e| invalid("OAUTH_AUTH_URL", e))?;
    let token_url = TokenUrl::new(config.oauth_token_url.clone())
        .map_err(|e| invalid("OAUTH_TOKEN_URL", e))?;
    let redirect_url = RedirectUrl::new(config.oauth_redirect_url.clone())
        .map_err(|e| invalid("OAUTH_REDIRECT_URL", e))?;

    let client = BasicClient::new(ClientId::new(config.oauth_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.oauth_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}

/// Picks the hot store: the live-game service when configured, otherwise in-memory.
pub fn setup_live_game_store(
    live_game_service_url: Option<&str>,
    http_client: reqwest::Client,
) -> Arc<dyn LiveGameStore> {
    match live_game_service_url {
        Some(url) => {
            tracing::info!("Using live-game service at {}", url);
            Arc::new(HttpLiveGameStore::new(http_client, url))
        }
        None => {
            tracing::warn!(
                "LIVE_GAME_SERVICE_URL not set, live games are kept in memory and lost on restart"
            );
            Arc::new(InMemoryLiveGameStore::new())
        }
    }
}
