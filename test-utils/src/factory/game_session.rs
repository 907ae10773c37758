//! Game session factory for creating sessions in any lifecycle state.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test game sessions.
///
/// The factory writes whatever status and live game reference it is given, which lets
/// tests seed records that the application itself would never produce (stuck or
/// inconsistent rows).
pub struct GameSessionFactory<'a> {
    db: &'a DatabaseConnection,
    campaign_id: i32,
    host_id: i32,
    name: String,
    status: String,
    live_game_id: Option<String>,
    capacity: i32,
    status_changed_at: DateTime<Utc>,
}

impl<'a> GameSessionFactory<'a> {
    /// Creates a new factory for an `INACTIVE` session with capacity 6.
    pub fn new(db: &'a DatabaseConnection, campaign_id: i32, host_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            campaign_id,
            host_id,
            name: format!("Session {}", id),
            status: "INACTIVE".to_string(),
            live_game_id: None,
            capacity: 6,
            status_changed_at: Utc::now(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the raw status column (`INACTIVE`, `STARTING`, `ACTIVE`, `STOPPING`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn live_game_id(mut self, live_game_id: impl Into<String>) -> Self {
        self.live_game_id = Some(live_game_id.into());
        self
    }

    pub fn capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Backdates the last status change, used to age sessions for repair tests.
    pub fn status_changed_at(mut self, status_changed_at: DateTime<Utc>) -> Self {
        self.status_changed_at = status_changed_at;
        self
    }

    /// Builds and inserts the session entity into the database.
    pub async fn build(self) -> Result<entity::game_session::Model, DbErr> {
        entity::game_session::ActiveModel {
            campaign_id: ActiveValue::Set(self.campaign_id),
            host_id: ActiveValue::Set(self.host_id),
            name: ActiveValue::Set(self.name),
            status: ActiveValue::Set(self.status),
            live_game_id: ActiveValue::Set(self.live_game_id),
            capacity: ActiveValue::Set(self.capacity),
            created_at: ActiveValue::Set(Utc::now()),
            started_at: ActiveValue::Set(None),
            stopped_at: ActiveValue::Set(None),
            status_changed_at: ActiveValue::Set(self.status_changed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an inactive session with default values.
pub async fn create_session(
    db: &DatabaseConnection,
    campaign_id: i32,
    host_id: i32,
) -> Result<entity::game_session::Model, DbErr> {
    GameSessionFactory::new(db, campaign_id, host_id).build().await
}
