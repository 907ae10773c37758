use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CampaignDto {
    pub id: i32,
    pub host_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub audio: Value,
    #[schema(value_type = Object)]
    pub scenes: Value,
    #[schema(value_type = Object)]
    pub assets: Value,
    pub players: Vec<CampaignPlayerDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CampaignPlayerDto {
    pub user_id: i32,
    /// `INVITED` or `JOINED`
    pub status: String,
    pub invited_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateCampaignDto {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub audio: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub scenes: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub assets: Option<Value>,
}

/// Partial campaign update; absent fields are left unchanged.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct UpdateCampaignDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub audio: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub scenes: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub assets: Option<Value>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct InvitePlayerDto {
    pub user_id: i32,
}
