//! Campaign player factory for invite and membership rows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

async fn insert(
    db: &DatabaseConnection,
    campaign_id: i32,
    user_id: i32,
    status: &str,
) -> Result<entity::campaign_player::Model, DbErr> {
    entity::campaign_player::ActiveModel {
        campaign_id: ActiveValue::Set(campaign_id),
        user_id: ActiveValue::Set(user_id),
        status: ActiveValue::Set(status.to_string()),
        invited_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Adds `user_id` to the campaign as a joined player.
pub async fn create_campaign_player(
    db: &DatabaseConnection,
    campaign_id: i32,
    user_id: i32,
) -> Result<entity::campaign_player::Model, DbErr> {
    insert(db, campaign_id, user_id, "JOINED").await
}

/// Adds `user_id` to the campaign with a pending invite.
pub async fn create_invited_player(
    db: &DatabaseConnection,
    campaign_id: i32,
    user_id: i32,
) -> Result<entity::campaign_player::Model, DbErr> {
    insert(db, campaign_id, user_id, "INVITED").await
}
