//! Campaign data repository.
//!
//! Campaigns are returned together with their player rows so callers can check
//! membership without a second query.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::campaign::{
    Campaign, CampaignPlayer, CreateCampaignParam, UpdateCampaignParam,
};

pub struct CampaignRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CampaignRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a campaign hosted by `param.host_id` with no players.
    pub async fn create(&self, param: CreateCampaignParam) -> Result<Campaign, DbErr> {
        let now = Utc::now();

        let entity = entity::campaign::ActiveModel {
            host_id: ActiveValue::Set(param.host_id),
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            audio: ActiveValue::Set(param.config.audio),
            scenes: ActiveValue::Set(param.config.scenes),
            assets: ActiveValue::Set(param.config.assets),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Campaign::from_entity(entity, Vec::new()))
    }

    /// Finds a campaign with its players.
    ///
    /// # Returns
    /// - `Ok(Some(Campaign))` - Campaign found
    /// - `Ok(None)` - No campaign with that id
    /// - `Err(DbErr)` - Database error or unreadable player status
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Campaign>, DbErr> {
        let Some(entity) = entity::prelude::Campaign::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let players = self.players(&[id]).await?.remove(&id).unwrap_or_default();

        Ok(Some(Campaign::from_entity(entity, players)))
    }

    /// Lists campaigns the user hosts or has a player row in (invited or joined).
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Campaign>, DbErr> {
        let member_of: Vec<i32> = entity::prelude::CampaignPlayer::find()
            .filter(entity::campaign_player::Column::UserId.eq(user_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|p| p.campaign_id)
            .collect();

        let entities = entity::prelude::Campaign::find()
            .filter(
                Condition::any()
                    .add(entity::campaign::Column::HostId.eq(user_id))
                    .add(entity::campaign::Column::Id.is_in(member_of)),
            )
            .order_by_asc(entity::campaign::Column::Id)
            .all(self.db)
            .await?;

        let ids: Vec<i32> = entities.iter().map(|c| c.id).collect();
        let mut players = self.players(&ids).await?;

        Ok(entities
            .into_iter()
            .map(|entity| {
                let campaign_players = players.remove(&entity.id).unwrap_or_default();
                Campaign::from_entity(entity, campaign_players)
            })
            .collect())
    }

    /// Applies the provided fields and bumps `updated_at`.
    ///
    /// Also used to write the final live configuration back when a session ends.
    ///
    /// # Returns
    /// - `Ok(Some(Campaign))` - Updated campaign
    /// - `Ok(None)` - No campaign with that id
    pub async fn update(
        &self,
        id: i32,
        param: UpdateCampaignParam,
    ) -> Result<Option<Campaign>, DbErr> {
        let Some(entity) = entity::prelude::Campaign::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::campaign::ActiveModel = entity.into();

        if let Some(name) = param.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        if let Some(audio) = param.audio {
            active_model.audio = ActiveValue::Set(audio);
        }
        if let Some(scenes) = param.scenes {
            active_model.scenes = ActiveValue::Set(scenes);
        }
        if let Some(assets) = param.assets {
            active_model.assets = ActiveValue::Set(assets);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await?;

        self.find_by_id(id).await
    }

    /// Deletes a campaign; players and sessions cascade. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Campaign::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Loads player rows for the given campaigns, keyed by campaign id.
    async fn players(&self, campaign_ids: &[i32]) -> Result<HashMap<i32, Vec<CampaignPlayer>>, DbErr> {
        if campaign_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::CampaignPlayer::find()
            .filter(entity::campaign_player::Column::CampaignId.is_in(campaign_ids.to_vec()))
            .order_by_asc(entity::campaign_player::Column::InvitedAt)
            .order_by_asc(entity::campaign_player::Column::UserId)
            .all(self.db)
            .await?;

        let mut players: HashMap<i32, Vec<CampaignPlayer>> = HashMap::new();
        for row in rows {
            let player = CampaignPlayer::from_entity(row)?;
            players.entry(player.campaign_id).or_default().push(player);
        }

        Ok(players)
    }
}
