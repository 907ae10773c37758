use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use sea_orm::sea_query::Expr;

use crate::server::model::campaign::{CampaignPlayer, PlayerStatus};

pub struct CampaignPlayerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CampaignPlayerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending invite.
    pub async fn invite(&self, campaign_id: i32, user_id: i32) -> Result<CampaignPlayer, DbErr> {
        let entity = entity::campaign_player::ActiveModel {
            campaign_id: ActiveValue::Set(campaign_id),
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(PlayerStatus::Invited.as_str().to_string()),
            invited_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(CampaignPlayer::from_entity(entity)?)
    }

    pub async fn find(
        &self,
        campaign_id: i32,
        user_id: i32,
    ) -> Result<Option<CampaignPlayer>, DbErr> {
        let entity = entity::prelude::CampaignPlayer::find_by_id((campaign_id, user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(CampaignPlayer::from_entity).transpose()?)
    }

    /// Moves an invite to `JOINED`.
    ///
    /// # Returns
    /// - `Ok(Some(CampaignPlayer))` - Invite accepted
    /// - `Ok(None)` - No pending invite for that user
    pub async fn accept(
        &self,
        campaign_id: i32,
        user_id: i32,
    ) -> Result<Option<CampaignPlayer>, DbErr> {
        let result = entity::prelude::CampaignPlayer::update_many()
            .col_expr(
                entity::campaign_player::Column::Status,
                Expr::value(PlayerStatus::Joined.as_str()),
            )
            .filter(entity::campaign_player::Column::CampaignId.eq(campaign_id))
            .filter(entity::campaign_player::Column::UserId.eq(user_id))
            .filter(entity::campaign_player::Column::Status.eq(PlayerStatus::Invited.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find(campaign_id, user_id).await
    }

    /// Removes an invite or membership. Returns whether a row was removed.
    pub async fn remove(&self, campaign_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CampaignPlayer::delete_by_id((campaign_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_by_campaign(&self, campaign_id: i32) -> Result<Vec<CampaignPlayer>, DbErr> {
        let entities = entity::prelude::CampaignPlayer::find()
            .filter(entity::campaign_player::Column::CampaignId.eq(campaign_id))
            .order_by_asc(entity::campaign_player::Column::InvitedAt)
            .order_by_asc(entity::campaign_player::Column::UserId)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|e| CampaignPlayer::from_entity(e).map_err(DbErr::from))
            .collect()
    }
}
