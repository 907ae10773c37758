use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        campaign::CampaignRepository, game_session::GameSessionRepository,
        session_player::SessionPlayerRepository,
    },
    error::{session::SessionError, AppError},
    model::game_session::{CreateGameSessionParam, GameSession, SessionStatus},
};

/// Session scheduling and roster management.
///
/// Status changes are not handled here; see [`super::lifecycle::SessionLifecycleService`].
pub struct GameSessionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameSessionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an `INACTIVE` session after validating its capacity.
    pub async fn create(&self, param: CreateGameSessionParam) -> Result<GameSession, AppError> {
        param.validate()?;

        let session = GameSessionRepository::new(self.db).create(param).await?;

        tracing::info!(
            "Created session {} for campaign {}",
            session.id,
            session.campaign_id
        );

        Ok(session)
    }

    /// Gets a session or fails with 404.
    pub async fn get(&self, session_id: i32) -> Result<GameSession, AppError> {
        GameSessionRepository::new(self.db)
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))
    }

    /// Lists the sessions of a campaign, oldest first.
    ///
    /// # Arguments
    /// - `campaign_id` - Campaign the sessions belong to
    ///
    /// # Returns
    /// - `Ok(Vec<GameSession>)` - Sessions with their rosters, empty for unknown campaigns
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn list_by_campaign(&self, campaign_id: i32) -> Result<Vec<GameSession>, AppError> {
        Ok(GameSessionRepository::new(self.db)
            .list_by_campaign(campaign_id)
            .await?)
    }

    /// Deletes an `INACTIVE` session.
    pub async fn delete(&self, session_id: i32) -> Result<(), AppError> {
        let session = self.get(session_id).await?;
        session.require_status(SessionStatus::Inactive)?;

        if !GameSessionRepository::new(self.db)
            .delete_inactive(session_id)
            .await?
        {
            return Err(SessionError::StatusConflict {
                session_id,
                expected: SessionStatus::Inactive,
            }
            .into());
        }

        Ok(())
    }

    /// Adds a joined campaign player to the session roster.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - Session with the updated roster
    /// - `Err(AppError::NotFound)` - Session does not exist
    /// - `Err(AppError::BadRequest)` - User is the host or not a joined campaign player
    /// - `Err(AppError::SessionErr)` - Already joined or session full
    pub async fn join(&self, session_id: i32, user_id: i32) -> Result<GameSession, AppError> {
        let session = self.get(session_id).await?;

        if session.is_host(user_id) {
            return Err(AppError::BadRequest(
                "The host does not take a player slot".to_string(),
            ));
        }

        let campaign = CampaignRepository::new(self.db)
            .find_by_id(session.campaign_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Campaign {} not found", session.campaign_id))
            })?;

        if !campaign.is_member(user_id) {
            return Err(AppError::BadRequest(format!(
                "User {} has not joined campaign {}",
                user_id, campaign.id
            )));
        }

        if session.has_joined(user_id) {
            return Err(SessionError::AlreadyJoined {
                session_id,
                user_id,
            }
            .into());
        }

        if session.is_full() {
            return Err(SessionError::AtCapacity {
                session_id,
                capacity: session.capacity,
            }
            .into());
        }

        SessionPlayerRepository::new(self.db)
            .join(session_id, user_id)
            .await?;

        self.get(session_id).await
    }

    /// Removes a player from the session roster.
    ///
    /// # Arguments
    /// - `session_id` - Session to leave
    /// - `user_id` - Player leaving
    ///
    /// # Returns
    /// - `Ok(GameSession)` - Session with the updated roster
    /// - `Err(AppError::NotFound)` - Session does not exist
    /// - `Err(AppError::SessionErr)` - User is not on the roster
    pub async fn leave(&self, session_id: i32, user_id: i32) -> Result<GameSession, AppError> {
        let session = self.get(session_id).await?;

        if !SessionPlayerRepository::new(self.db)
            .leave(session.id, user_id)
            .await?
        {
            return Err(SessionError::NotJoined {
                session_id,
                user_id,
            }
            .into());
        }

        self.get(session_id).await
    }
}
