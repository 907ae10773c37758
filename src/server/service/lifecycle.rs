//! Session lifecycle and hot/cold migration.
//!
//! Starting a session copies the campaign configuration into a new live game in the
//! hot store; ending it writes the final live configuration back into the campaign and
//! discards the live game. Every status change is a guarded update, so a request that
//! loses a race gets `SessionError::StatusConflict` instead of overwriting the winner.
//!
//! There is no transaction spanning both stores. A failure while `STARTING` is rolled
//! back when possible; anything left behind is picked up by the repair job. An end that
//! fails while `STOPPING` can be resumed by calling `end` again.

use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    model::notification::NotificationDto,
    server::{
        data::{campaign::CampaignRepository, game_session::GameSessionRepository},
        error::{auth::AuthError, session::SessionError, AppError},
        model::{
            campaign::{Campaign, UpdateCampaignParam},
            game_session::{GameSession, SessionStatus, SessionTransition},
            live_game::{LiveGame, LiveGamePatch, NewLiveGame, Seat},
        },
        service::{live_game::LiveGameStore, notification::NotificationHub},
    },
};

pub struct SessionLifecycleService<'a> {
    db: &'a DatabaseConnection,
    live_games: &'a dyn LiveGameStore,
    notifications: &'a NotificationHub,
}

impl<'a> SessionLifecycleService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        live_games: &'a dyn LiveGameStore,
        notifications: &'a NotificationHub,
    ) -> Self {
        Self {
            db,
            live_games,
            notifications,
        }
    }

    /// Starts a session: INACTIVE → STARTING → ACTIVE.
    ///
    /// # Arguments
    /// - `session_id` - Session to start
    /// - `requester_id` - User asking; must host the session
    ///
    /// # Returns
    /// - `Ok(GameSession)` - The `ACTIVE` session
    /// - `Err(AppError::NotFound)` - Session or campaign does not exist
    /// - `Err(AppError::AuthErr)` - Requester is not the host (403)
    /// - `Err(AppError::SessionErr)` - Not `INACTIVE`, campaign busy, seating over capacity
    ///   or lost a race (400)
    /// - `Err(AppError::LiveGameErr)` - Hot store creation failed; the session was rolled
    ///   back to `INACTIVE` (500)
    pub async fn start(&self, session_id: i32, requester_id: i32) -> Result<GameSession, AppError> {
        let repo = GameSessionRepository::new(self.db);

        let session = self.load_as_host(session_id, requester_id).await?;
        session.require_status(SessionStatus::Inactive)?;

        if repo.campaign_has_live_session(session.campaign_id).await? {
            return Err(SessionError::CampaignBusy(session.campaign_id).into());
        }

        let campaign = self.load_campaign(session.campaign_id).await?;
        let seating = initial_seating(&session, &campaign)?;

        let live_game_id = Uuid::new_v4().to_string();

        repo.transition(session_id, &SessionTransition::start(live_game_id.clone()))
            .await?
            .ok_or(SessionError::StatusConflict {
                session_id,
                expected: SessionStatus::Inactive,
            })?;

        tracing::info!(
            "Session {} STARTING with live game {}",
            session_id,
            live_game_id
        );

        let seed = NewLiveGame {
            id: live_game_id.clone(),
            session_id,
            campaign_id: campaign.id,
            host_id: session.host_id,
            seating,
            audio: campaign.config.audio.clone(),
            scenes: campaign.config.scenes.clone(),
            assets: campaign.config.assets.clone(),
        };

        if let Err(err) = self.live_games.create(seed).await {
            tracing::error!(
                "Failed to create live game {} for session {}: {}",
                live_game_id,
                session_id,
                err
            );
            self.roll_back_start(session_id, &live_game_id).await;
            return Err(err.into());
        }

        let active = match repo
            .transition(session_id, &SessionTransition::activate(live_game_id.clone()))
            .await
        {
            Ok(Some(active)) => active,
            Ok(None) => {
                // Rolled back underneath us, most likely by the repair job.
                self.discard_live_game(&live_game_id).await;
                return Err(SessionError::StatusConflict {
                    session_id,
                    expected: SessionStatus::Starting,
                }
                .into());
            }
            Err(err) => {
                tracing::error!(
                    "Live game {} created but session {} could not be activated: {}",
                    live_game_id,
                    session_id,
                    err
                );
                return Err(err.into());
            }
        };

        tracing::info!("Session {} ACTIVE", session_id);

        self.notifications
            .send_to_users(
                &campaign.audience(),
                &NotificationDto::SessionStarted {
                    session_id,
                    campaign_id: campaign.id,
                    live_game_id,
                },
            )
            .await;

        Ok(active)
    }

    /// Ends a session: ACTIVE → STOPPING → INACTIVE.
    ///
    /// Calling `end` on a `STOPPING` session resumes an interrupted migration.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - The `INACTIVE` session
    /// - `Err(AppError::NotFound)` - Session does not exist
    /// - `Err(AppError::AuthErr)` - Requester is not the host (403)
    /// - `Err(AppError::SessionErr)` - Session not `ACTIVE`/`STOPPING` or lost a race (400)
    /// - `Err(AppError::LiveGameErr)` - Reading the live game failed; the session stays
    ///   `STOPPING` (500)
    pub async fn end(&self, session_id: i32, requester_id: i32) -> Result<GameSession, AppError> {
        let repo = GameSessionRepository::new(self.db);

        let session = self.load_as_host(session_id, requester_id).await?;

        let live_game_id = match (session.status, session.live_game_id.clone()) {
            (SessionStatus::Active, Some(live_game_id)) => {
                repo.transition(session_id, &SessionTransition::stop(live_game_id.clone()))
                    .await?
                    .ok_or(SessionError::StatusConflict {
                        session_id,
                        expected: SessionStatus::Active,
                    })?;
                tracing::info!("Session {} STOPPING", session_id);
                live_game_id
            }
            (SessionStatus::Stopping, Some(live_game_id)) => {
                tracing::info!("Resuming migration of stopping session {}", session_id);
                live_game_id
            }
            (SessionStatus::Active | SessionStatus::Stopping, None) => {
                return Err(AppError::InternalError(format!(
                    "Session {} is {} without a live game reference",
                    session_id, session.status
                )));
            }
            (actual, _) => {
                return Err(SessionError::WrongStatus {
                    session_id,
                    expected: SessionStatus::Active,
                    actual,
                }
                .into());
            }
        };

        match self.live_games.get(&live_game_id).await? {
            Some(live_game) => {
                CampaignRepository::new(self.db)
                    .update(
                        session.campaign_id,
                        UpdateCampaignParam::from(live_game.config()),
                    )
                    .await?;
                tracing::debug!(
                    "Wrote live game {} back into campaign {}",
                    live_game_id,
                    session.campaign_id
                );
            }
            None => tracing::warn!(
                "Live game {} of session {} is gone, campaign {} keeps its previous configuration",
                live_game_id,
                session_id,
                session.campaign_id
            ),
        }

        let inactive = repo
            .transition(session_id, &SessionTransition::finish())
            .await?
            .ok_or(SessionError::StatusConflict {
                session_id,
                expected: SessionStatus::Stopping,
            })?;

        tracing::info!("Session {} INACTIVE", session_id);

        self.discard_live_game(&live_game_id).await;

        let audience = match CampaignRepository::new(self.db)
            .find_by_id(session.campaign_id)
            .await?
        {
            Some(campaign) => campaign.audience(),
            None => vec![session.host_id],
        };

        self.notifications
            .send_to_users(
                &audience,
                &NotificationDto::SessionEnded {
                    session_id,
                    campaign_id: session.campaign_id,
                },
            )
            .await;

        Ok(inactive)
    }

    /// Reads the live state of a session that is not `INACTIVE`.
    pub async fn live_state(&self, session_id: i32) -> Result<LiveGame, AppError> {
        let session = self.load(session_id).await?;

        let Some(live_game_id) = session.live_game_id.as_deref() else {
            return Err(SessionError::WrongStatus {
                session_id,
                expected: SessionStatus::Active,
                actual: session.status,
            }
            .into());
        };

        self.live_games
            .get(live_game_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Live game {} not found", live_game_id)))
    }

    /// Patches the live state of an `ACTIVE` session and tells the table about it.
    ///
    /// A new seating may only seat the host and campaign players, each user once, and
    /// at most `capacity` players besides the host.
    ///
    /// # Returns
    /// - `Ok(LiveGame)` - Updated live game
    /// - `Err(AppError::BadRequest)` - Seating lists an outsider or a user twice
    /// - `Err(SessionError::AtCapacity)` - Seating exceeds the session capacity
    pub async fn update_live_state(
        &self,
        session_id: i32,
        requester_id: i32,
        patch: LiveGamePatch,
    ) -> Result<LiveGame, AppError> {
        let session = self.load_as_host(session_id, requester_id).await?;
        session.require_status(SessionStatus::Active)?;

        let live_game_id = session.live_game_id.as_deref().ok_or_else(|| {
            AppError::InternalError(format!(
                "Session {} is ACTIVE without a live game reference",
                session_id
            ))
        })?;

        if let Some(seating) = patch.seating.as_deref() {
            let campaign = self.load_campaign(session.campaign_id).await?;
            check_seating(&session, &campaign, seating)?;
        }

        let live_game = self.live_games.update(live_game_id, patch).await?;

        let audience: Vec<i32> = std::iter::once(session.host_id)
            .chain(live_game.seating.iter().map(|seat| seat.user_id))
            .chain(session.roster.iter().copied())
            .collect();

        self.notifications
            .send_to_users(&audience, &NotificationDto::LiveGameUpdated { session_id })
            .await;

        Ok(live_game)
    }

    async fn load(&self, session_id: i32) -> Result<GameSession, AppError> {
        GameSessionRepository::new(self.db)
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))
    }

    async fn load_as_host(
        &self,
        session_id: i32,
        requester_id: i32,
    ) -> Result<GameSession, AppError> {
        let session = self.load(session_id).await?;

        if !session.is_host(requester_id) {
            return Err(AuthError::AccessDenied(
                requester_id,
                format!("User is not the host of session {}", session_id),
            )
            .into());
        }

        Ok(session)
    }

    async fn load_campaign(&self, campaign_id: i32) -> Result<Campaign, AppError> {
        CampaignRepository::new(self.db)
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
    }

    /// STARTING → INACTIVE after a failed start.
    ///
    /// Failures are logged only; the session then stays `STARTING` for the repair job.
    async fn roll_back_start(&self, session_id: i32, live_game_id: &str) {
        match GameSessionRepository::new(self.db)
            .transition(session_id, &SessionTransition::roll_back())
            .await
        {
            Ok(Some(_)) => tracing::info!("Session {} rolled back to INACTIVE", session_id),
            Ok(None) => tracing::warn!(
                "Session {} left STARTING before it could be rolled back",
                session_id
            ),
            Err(err) => tracing::error!(
                "Failed to roll back session {}, left STARTING for repair: {}",
                session_id,
                err
            ),
        }

        self.discard_live_game(live_game_id).await;
    }

    /// Best-effort removal of a live game document.
    async fn discard_live_game(&self, live_game_id: &str) {
        match self.live_games.delete(live_game_id).await {
            Ok(true) => tracing::debug!("Discarded live game {}", live_game_id),
            Ok(false) => {}
            Err(err) => tracing::warn!("Failed to discard live game {}: {}", live_game_id, err),
        }
    }
}

/// Host first, then every invited or joined campaign player.
///
/// Fails with `AtCapacity` when the players exceed the session capacity.
pub fn initial_seating(session: &GameSession, campaign: &Campaign) -> Result<Vec<Seat>, SessionError> {
    if campaign.players.len() > session.capacity as usize {
        return Err(SessionError::AtCapacity {
            session_id: session.id,
            capacity: session.capacity,
        });
    }

    let players = campaign
        .players
        .iter()
        .map(|player| player.user_id)
        .filter(|&user_id| user_id != session.host_id);

    Ok(Seat::assign(std::iter::once(session.host_id).chain(players)))
}

/// Validates a replacement seating against the session and its campaign.
fn check_seating(
    session: &GameSession,
    campaign: &Campaign,
    seating: &[Seat],
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for seat in seating {
        if !campaign.is_host(seat.user_id) && campaign.player(seat.user_id).is_none() {
            return Err(AppError::BadRequest(format!(
                "User {} is not a player of campaign {}",
                seat.user_id, campaign.id
            )));
        }
        if !seen.insert(seat.user_id) {
            return Err(AppError::BadRequest(format!(
                "User {} is seated more than once",
                seat.user_id
            )));
        }
    }

    let players = seating
        .iter()
        .filter(|seat| seat.user_id != session.host_id)
        .count();
    if players > session.capacity as usize {
        return Err(SessionError::AtCapacity {
            session_id: session.id,
            capacity: session.capacity,
        }
        .into());
    }

    Ok(())
}
