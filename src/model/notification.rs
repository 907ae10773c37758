use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Events pushed to connected users over `/api/ws`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationDto {
    SessionStarted {
        session_id: i32,
        campaign_id: i32,
        live_game_id: String,
    },
    SessionEnded {
        session_id: i32,
        campaign_id: i32,
    },
    LiveGameUpdated {
        session_id: i32,
    },
    CampaignInvite {
        campaign_id: i32,
        campaign_name: String,
    },
}
