//! Game session repository.
//!
//! Status changes go through [`GameSessionRepository::transition`], a single guarded
//! `UPDATE ... WHERE id = ? AND status = ?`. Two requests racing on the same session
//! cannot both win: the loser sees zero affected rows and gets `Ok(None)`.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, UpdateMany,
};

use crate::server::{
    data::session_player::SessionPlayerRepository,
    model::game_session::{
        CreateGameSessionParam, GameSession, SessionStatus, SessionTransition,
    },
};

use entity::game_session::Column;

pub struct GameSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an `INACTIVE` session with an empty roster.
    pub async fn create(&self, param: CreateGameSessionParam) -> Result<GameSession, DbErr> {
        let now = Utc::now();

        let entity = entity::game_session::ActiveModel {
            campaign_id: ActiveValue::Set(param.campaign_id),
            host_id: ActiveValue::Set(param.host_id),
            name: ActiveValue::Set(param.name),
            status: ActiveValue::Set(SessionStatus::Inactive.as_str().to_string()),
            live_game_id: ActiveValue::Set(None),
            capacity: ActiveValue::Set(param.capacity),
            created_at: ActiveValue::Set(now),
            started_at: ActiveValue::Set(None),
            stopped_at: ActiveValue::Set(None),
            status_changed_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GameSession::from_entity(entity, Vec::new())?)
    }

    /// Finds a session with its roster.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<GameSession>, DbErr> {
        let Some(entity) = entity::prelude::GameSession::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roster = SessionPlayerRepository::new(self.db).roster(id).await?;

        Ok(Some(GameSession::from_entity(entity, roster)?))
    }

    /// Lists the sessions of a campaign, oldest first.
    pub async fn list_by_campaign(&self, campaign_id: i32) -> Result<Vec<GameSession>, DbErr> {
        let entities = entity::prelude::GameSession::find()
            .filter(Column::CampaignId.eq(campaign_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        self.with_rosters(entities).await
    }

    /// Deletes a session only while it is `INACTIVE`.
    ///
    /// # Returns
    /// - `Ok(true)` - Session deleted
    /// - `Ok(false)` - No such session, or it is live
    pub async fn delete_inactive(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::GameSession::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(SessionStatus::Inactive.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Applies a validated status change if the stored status still equals `transition.from()`.
    ///
    /// Stamps `status_changed_at`, and `started_at` on STARTING→ACTIVE or `stopped_at`
    /// on STOPPING→INACTIVE. The live game reference is written together with the status.
    ///
    /// # Returns
    /// - `Ok(Some(GameSession))` - The session after the update
    /// - `Ok(None)` - Session missing or its status was not `transition.from()`
    /// - `Err(DbErr)` - Database error
    pub async fn transition(
        &self,
        id: i32,
        transition: &SessionTransition,
    ) -> Result<Option<GameSession>, DbErr> {
        let result = Self::transition_update(transition)
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(transition.from().as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Like [`Self::transition`], but only while the session still holds the state
    /// observed by [`Self::find_stale`].
    ///
    /// The update additionally requires the last status change to be before
    /// `older_than` and the stored live game reference to equal `live_game_id`, so a
    /// session that was restarted since it was read is left alone.
    ///
    /// # Arguments
    /// - `id` - Session to update
    /// - `transition` - Validated status change
    /// - `live_game_id` - Reference the session held when it was found stale
    /// - `older_than` - Cutoff the session was found stale against
    ///
    /// # Returns
    /// - `Ok(Some(GameSession))` - The session after the update
    /// - `Ok(None)` - Session missing, moved on, restarted or no longer stale
    /// - `Err(DbErr)` - Database error
    pub async fn transition_if_stale(
        &self,
        id: i32,
        transition: &SessionTransition,
        live_game_id: Option<&str>,
        older_than: DateTime<Utc>,
    ) -> Result<Option<GameSession>, DbErr> {
        let reference = match live_game_id {
            Some(live_game_id) => Column::LiveGameId.eq(live_game_id),
            None => Column::LiveGameId.is_null(),
        };

        let result = Self::transition_update(transition)
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(transition.from().as_str()))
            .filter(Column::StatusChangedAt.lt(older_than))
            .filter(reference)
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Whether any session of the campaign is outside `INACTIVE`.
    pub async fn campaign_has_live_session(&self, campaign_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::GameSession::find()
            .filter(Column::CampaignId.eq(campaign_id))
            .filter(Column::Status.ne(SessionStatus::Inactive.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Sessions in `status` whose last status change is strictly before `older_than`.
    pub async fn find_stale(
        &self,
        status: SessionStatus,
        older_than: DateTime<Utc>,
    ) -> Result<Vec<GameSession>, DbErr> {
        let entities = entity::prelude::GameSession::find()
            .filter(Column::Status.eq(status.as_str()))
            .filter(Column::StatusChangedAt.lt(older_than))
            .order_by_asc(Column::StatusChangedAt)
            .all(self.db)
            .await?;

        self.with_rosters(entities).await
    }

    fn transition_update(transition: &SessionTransition) -> UpdateMany<entity::game_session::Entity> {
        let now = Utc::now();

        let update = entity::prelude::GameSession::update_many()
            .col_expr(Column::Status, Expr::value(transition.to().as_str()))
            .col_expr(
                Column::LiveGameId,
                Expr::value(transition.live_game_id().map(str::to_string)),
            )
            .col_expr(Column::StatusChangedAt, Expr::value(now));

        match (transition.from(), transition.to()) {
            (SessionStatus::Starting, SessionStatus::Active) => {
                update.col_expr(Column::StartedAt, Expr::value(Some(now)))
            }
            (SessionStatus::Stopping, SessionStatus::Inactive) => {
                update.col_expr(Column::StoppedAt, Expr::value(Some(now)))
            }
            _ => update,
        }
    }

    async fn with_rosters(
        &self,
        entities: Vec<entity::game_session::Model>,
    ) -> Result<Vec<GameSession>, DbErr> {
        let ids: Vec<i32> = entities.iter().map(|s| s.id).collect();
        let mut rosters = SessionPlayerRepository::new(self.db).rosters(&ids).await?;

        entities
            .into_iter()
            .map(|entity| {
                let roster = rosters.remove(&entity.id).unwrap_or_default();
                GameSession::from_entity(entity, roster).map_err(DbErr::from)
            })
            .collect()
    }
}
