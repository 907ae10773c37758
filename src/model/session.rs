use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct GameSessionDto {
    pub id: i32,
    pub campaign_id: i32,
    pub host_id: i32,
    pub name: String,
    /// `INACTIVE`, `STARTING`, `ACTIVE` or `STOPPING`
    pub status: String,
    pub live_game_id: Option<String>,
    pub capacity: i32,
    /// User ids that joined the session.
    pub roster: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub status_changed_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateGameSessionDto {
    pub name: String,
    /// Maximum number of players, defaults to 6.
    #[serde(default)]
    pub capacity: Option<i32>,
}
