use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct SeatDto {
    pub seat: u32,
    pub user_id: i32,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct LiveGameDto {
    pub id: String,
    pub session_id: i32,
    pub campaign_id: i32,
    pub host_id: i32,
    pub seating: Vec<SeatDto>,
    #[schema(value_type = Option<Object>)]
    pub active_display: Option<Value>,
    #[schema(value_type = Object)]
    pub audio: Value,
    #[schema(value_type = Object)]
    pub scenes: Value,
    #[schema(value_type = Object)]
    pub assets: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial live state update sent by the host during play.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct UpdateLiveGameDto {
    /// New active display (map, handout, image) shown to every player.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub active_display: Option<Value>,
    /// Clears the active display; takes precedence over `active_display`.
    #[serde(default)]
    pub clear_active_display: bool,
    /// Full seating order as user ids; seat numbers follow list order.
    #[serde(default)]
    pub seating: Option<Vec<i32>>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub audio: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub scenes: Option<Value>,
}
