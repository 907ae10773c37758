use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{
        campaign::CampaignRepository, game_session::GameSessionRepository,
        user::UserRepository,
    },
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{campaign::Campaign, user::User},
};

/// Access requirements checked by [`AuthGuard::require`].
///
/// Each variant carries the id of the resource it guards. Referencing a missing
/// campaign or session fails with 404 before any access check.
pub enum Permission {
    /// User hosts the campaign.
    CampaignHost(i32),
    /// User hosts the campaign or has joined it as a player.
    CampaignMember(i32),
    /// User hosts the session.
    SessionHost(i32),
    /// User is a member of the session's campaign.
    SessionMember(i32),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the logged-in user and checks every permission in order.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user, all permissions satisfied
    /// - `Err(AuthError::UserNotInSession)` - Not logged in (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Session points at a deleted user (401)
    /// - `Err(AppError::NotFound)` - Referenced campaign or session does not exist
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied (403)
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match *permission {
                Permission::CampaignHost(campaign_id) => {
                    let campaign = self.campaign(campaign_id).await?;
                    if !campaign.is_host(user.id) {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!("User is not the host of campaign {}", campaign_id),
                        )
                        .into());
                    }
                }
                Permission::CampaignMember(campaign_id) => {
                    let campaign = self.campaign(campaign_id).await?;
                    if !campaign.is_member(user.id) {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!("User is not a member of campaign {}", campaign_id),
                        )
                        .into());
                    }
                }
                Permission::SessionHost(session_id) => {
                    let session = GameSessionRepository::new(self.db)
                        .find_by_id(session_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::NotFound(format!("Session {} not found", session_id))
                        })?;
                    if !session.is_host(user.id) {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!("User is not the host of session {}", session_id),
                        )
                        .into());
                    }
                }
                Permission::SessionMember(session_id) => {
                    let session = GameSessionRepository::new(self.db)
                        .find_by_id(session_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::NotFound(format!("Session {} not found", session_id))
                        })?;
                    let campaign = self.campaign(session.campaign_id).await?;
                    if !campaign.is_member(user.id) {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            format!(
                                "User is not a member of campaign {} hosting session {}",
                                campaign.id, session_id
                            ),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    async fn campaign(&self, campaign_id: i32) -> Result<Campaign, AppError> {
        CampaignRepository::new(self.db)
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }
}
