use chrono::{Duration, Utc};

use crate::server::error::{config::ConfigError, AppError};

/// Minutes a session may sit in `STARTING` before the repair job rolls it back.
pub const DEFAULT_STUCK_SESSION_THRESHOLD_MINUTES: i64 = 15;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_address: String,

    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_redirect_url: String,
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub oauth_userinfo_url: String,

    /// Base URL of the live-game service. When unset an in-memory store is used.
    pub live_game_service_url: Option<String>,

    pub stuck_session_threshold: Duration,
    /// Cron expression for the periodic repair job, disabled when unset.
    pub repair_schedule: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let stuck_session_threshold = match get("STUCK_SESSION_THRESHOLD_MINUTES") {
            Some(value) => parse_threshold_minutes(&value)?,
            None => Duration::minutes(DEFAULT_STUCK_SESSION_THRESHOLD_MINUTES),
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            app_url: require("APP_URL")?,
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            oauth_client_id: require("OAUTH_CLIENT_ID")?,
            oauth_client_secret: require("OAUTH_CLIENT_SECRET")?,
            oauth_redirect_url: require("OAUTH_REDIRECT_URL")?,
            oauth_auth_url: require("OAUTH_AUTH_URL")?,
            oauth_token_url: require("OAUTH_TOKEN_URL")?,
            oauth_userinfo_url: require("OAUTH_USERINFO_URL")?,
            live_game_service_url: get("LIVE_GAME_SERVICE_URL"),
            stuck_session_threshold,
            repair_schedule: get("REPAIR_SCHEDULE"),
        })
    }
}

/// Parses a positive number of minutes.
pub fn parse_threshold_minutes(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEnvVar {
        name: "STUCK_SESSION_THRESHOLD_MINUTES".to_string(),
        reason: reason.to_string(),
    };

    let minutes: i64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of minutes"))?;

    if minutes <= 0 {
        return Err(invalid("must be greater than zero"));
    }

    let threshold = Duration::try_minutes(minutes).ok_or_else(|| invalid("too large"))?;

    if Utc::now().checked_sub_signed(threshold).is_none() {
        return Err(invalid("too large"));
    }

    Ok(threshold)
}
