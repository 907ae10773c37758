//! Campaign factory for creating test campaign entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::{json, Value};

/// Factory for creating test campaigns.
///
/// Defaults to empty configuration objects for audio, scenes and assets.
pub struct CampaignFactory<'a> {
    db: &'a DatabaseConnection,
    host_id: i32,
    name: String,
    description: Option<String>,
    audio: Value,
    scenes: Value,
    assets: Value,
}

impl<'a> CampaignFactory<'a> {
    /// Creates a new CampaignFactory hosted by `host_id`.
    pub fn new(db: &'a DatabaseConnection, host_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            host_id,
            name: format!("Campaign {}", id),
            description: None,
            audio: json!({}),
            scenes: json!({}),
            assets: json!({}),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn audio(mut self, audio: Value) -> Self {
        self.audio = audio;
        self
    }

    pub fn scenes(mut self, scenes: Value) -> Self {
        self.scenes = scenes;
        self
    }

    pub fn assets(mut self, assets: Value) -> Self {
        self.assets = assets;
        self
    }

    /// Builds and inserts the campaign entity into the database.
    pub async fn build(self) -> Result<entity::campaign::Model, DbErr> {
        let now = Utc::now();
        entity::campaign::ActiveModel {
            host_id: ActiveValue::Set(self.host_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            audio: ActiveValue::Set(self.audio),
            scenes: ActiveValue::Set(self.scenes),
            assets: ActiveValue::Set(self.assets),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a campaign with default values hosted by `host_id`.
pub async fn create_campaign(
    db: &DatabaseConnection,
    host_id: i32,
) -> Result<entity::campaign::Model, DbErr> {
    CampaignFactory::new(db, host_id).build().await
}
