use sea_orm::DatabaseConnection;

use crate::{
    model::notification::NotificationDto,
    server::{
        data::{
            campaign::CampaignRepository, campaign_player::CampaignPlayerRepository,
            game_session::GameSessionRepository, user::UserRepository,
        },
        error::{session::SessionError, AppError},
        model::campaign::{Campaign, CampaignPlayer, CreateCampaignParam, UpdateCampaignParam},
        service::notification::NotificationHub,
    },
};

pub struct CampaignService<'a> {
    db: &'a DatabaseConnection,
    notifications: &'a NotificationHub,
}

impl<'a> CampaignService<'a> {
    pub fn new(db: &'a DatabaseConnection, notifications: &'a NotificationHub) -> Self {
        Self { db, notifications }
    }

    /// Creates a campaign hosted by `param.host_id`.
    ///
    /// # Arguments
    /// - `param` - Host, name, description and initial configuration
    ///
    /// # Returns
    /// - `Ok(Campaign)` - The new campaign, without players
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateCampaignParam) -> Result<Campaign, AppError> {
        let campaign = CampaignRepository::new(self.db).create(param).await?;

        tracing::info!(
            "User {} created campaign {} ({})",
            campaign.host_id,
            campaign.id,
            campaign.name
        );

        Ok(campaign)
    }

    /// Gets a campaign or fails with 404.
    pub async fn get(&self, campaign_id: i32) -> Result<Campaign, AppError> {
        CampaignRepository::new(self.db)
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }

    /// Lists campaigns the user hosts or was invited to, ordered by id.
    ///
    /// # Arguments
    /// - `user_id` - Requesting user
    ///
    /// # Returns
    /// - `Ok(Vec<Campaign>)` - Hosted campaigns and campaigns with an invited or joined
    ///   player row for the user
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Campaign>, AppError> {
        Ok(CampaignRepository::new(self.db)
            .list_for_user(user_id)
            .await?)
    }

    /// Updates name, description or configuration while no session is live.
    pub async fn update(
        &self,
        campaign_id: i32,
        param: UpdateCampaignParam,
    ) -> Result<Campaign, AppError> {
        self.require_configurable(campaign_id).await?;

        CampaignRepository::new(self.db)
            .update(campaign_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }

    /// Deletes a campaign while no session is live.
    pub async fn delete(&self, campaign_id: i32) -> Result<(), AppError> {
        self.require_configurable(campaign_id).await?;

        if !CampaignRepository::new(self.db).delete(campaign_id).await? {
            return Err(AppError::NotFound(format!(
                "Campaign {} not found",
                campaign_id
            )));
        }

        tracing::info!("Deleted campaign {}", campaign_id);

        Ok(())
    }

    /// Invites a user and notifies them.
    ///
    /// # Returns
    /// - `Ok(CampaignPlayer)` - Pending invite
    /// - `Err(AppError::NotFound)` - Campaign or user does not exist
    /// - `Err(AppError::BadRequest)` - User is the host or already invited/joined
    pub async fn invite(&self, campaign_id: i32, user_id: i32) -> Result<CampaignPlayer, AppError> {
        let campaign = self.get(campaign_id).await?;

        if UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        if campaign.is_host(user_id) {
            return Err(AppError::BadRequest(
                "The host cannot be invited to their own campaign".to_string(),
            ));
        }

        if campaign.player(user_id).is_some() {
            return Err(AppError::BadRequest(format!(
                "User {} is already part of campaign {}",
                user_id, campaign_id
            )));
        }

        let player = CampaignPlayerRepository::new(self.db)
            .invite(campaign_id, user_id)
            .await?;

        self.notifications
            .send_to_user(
                user_id,
                &NotificationDto::CampaignInvite {
                    campaign_id,
                    campaign_name: campaign.name,
                },
            )
            .await;

        Ok(player)
    }

    /// Accepts the user's pending invite.
    pub async fn accept_invite(
        &self,
        campaign_id: i32,
        user_id: i32,
    ) -> Result<CampaignPlayer, AppError> {
        CampaignPlayerRepository::new(self.db)
            .accept(campaign_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No pending invite for user {} in campaign {}",
                    user_id, campaign_id
                ))
            })
    }

    /// Removes an invite or membership (host kicking a player or a player leaving).
    pub async fn remove_player(&self, campaign_id: i32, user_id: i32) -> Result<(), AppError> {
        if !CampaignPlayerRepository::new(self.db)
            .remove(campaign_id, user_id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "User {} is not part of campaign {}",
                user_id, campaign_id
            )));
        }

        Ok(())
    }

    /// Fails with `CampaignBusy` when a session of the campaign is outside `INACTIVE`.
    pub async fn require_configurable(&self, campaign_id: i32) -> Result<(), AppError> {
        if GameSessionRepository::new(self.db)
            .campaign_has_live_session(campaign_id)
            .await?
        {
            return Err(SessionError::CampaignBusy(campaign_id).into());
        }

        Ok(())
    }
}
