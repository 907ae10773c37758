//! Session roster repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::collections::HashMap;

pub struct SessionPlayerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SessionPlayerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a user to the session roster.
    pub async fn join(&self, session_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::session_player::ActiveModel {
            session_id: ActiveValue::Set(session_id),
            user_id: ActiveValue::Set(user_id),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Removes a user from the roster. Returns whether a row was removed.
    pub async fn leave(&self, session_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SessionPlayer::delete_by_id((session_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Joined user ids in join order.
    pub async fn roster(&self, session_id: i32) -> Result<Vec<i32>, DbErr> {
        Ok(self
            .rosters(&[session_id])
            .await?
            .remove(&session_id)
            .unwrap_or_default())
    }

    /// Rosters of several sessions keyed by session id. Sessions without players are absent.
    pub async fn rosters(&self, session_ids: &[i32]) -> Result<HashMap<i32, Vec<i32>>, DbErr> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::SessionPlayer::find()
            .filter(entity::session_player::Column::SessionId.is_in(session_ids.to_vec()))
            .order_by_asc(entity::session_player::Column::JoinedAt)
            .order_by_asc(entity::session_player::Column::UserId)
            .all(self.db)
            .await?;

        let mut rosters: HashMap<i32, Vec<i32>> = HashMap::new();
        for row in rows {
            rosters.entry(row.session_id).or_default().push(row.user_id);
        }

        Ok(rosters)
    }
}
