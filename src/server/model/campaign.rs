//! Campaign domain models and parameters.
//!
//! A campaign owns the between-session configuration of a game: audio, scenes and
//! asset references, each an opaque JSON document. The configuration is copied into
//! the live game when a session starts and written back when it ends.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::str::FromStr;

use crate::{
    model::campaign::{CampaignDto, CampaignPlayerDto, CreateCampaignDto, UpdateCampaignDto},
    server::error::internal::InternalError,
};

/// Membership state of a campaign player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Invited by the host, not yet accepted.
    Invited,
    /// Accepted the invite.
    Joined,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "INVITED",
            Self::Joined => "JOINED",
        }
    }
}

impl FromStr for PlayerStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "INVITED" => Ok(Self::Invited),
            "JOINED" => Ok(Self::Joined),
            other => Err(InternalError::UnknownPlayerStatus(other.to_string())),
        }
    }
}

/// A user invited to or playing in a campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignPlayer {
    pub campaign_id: i32,
    pub user_id: i32,
    pub status: PlayerStatus,
    pub invited_at: DateTime<Utc>,
}

impl CampaignPlayer {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(CampaignPlayer)` - Converted player
    /// - `Err(InternalError::UnknownPlayerStatus)` - Stored status is not INVITED/JOINED
    pub fn from_entity(entity: entity::campaign_player::Model) -> Result<Self, InternalError> {
        Ok(Self {
            campaign_id: entity.campaign_id,
            user_id: entity.user_id,
            status: PlayerStatus::from_str(&entity.status)?,
            invited_at: entity.invited_at,
        })
    }

    pub fn into_dto(self) -> CampaignPlayerDto {
        CampaignPlayerDto {
            user_id: self.user_id,
            status: self.status.as_str().to_string(),
            invited_at: self.invited_at,
        }
    }
}

/// The migratable configuration blobs of a campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignConfig {
    pub audio: Value,
    pub scenes: Value,
    pub assets: Value,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            audio: json!({}),
            scenes: json!({}),
            assets: json!({}),
        }
    }
}

/// Campaign with its configuration and player list.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub id: i32,
    pub host_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub config: CampaignConfig,
    pub players: Vec<CampaignPlayer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Converts an entity model and its players at the repository boundary.
    pub fn from_entity(entity: entity::campaign::Model, players: Vec<CampaignPlayer>) -> Self {
        Self {
            id: entity.id,
            host_id: entity.host_id,
            name: entity.name,
            description: entity.description,
            config: CampaignConfig {
                audio: entity.audio,
                scenes: entity.scenes,
                assets: entity.assets,
            },
            players,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_host(&self, user_id: i32) -> bool {
        self.host_id == user_id
    }

    /// Host or a player who accepted the invite.
    pub fn is_member(&self, user_id: i32) -> bool {
        self.is_host(user_id)
            || self
                .players
                .iter()
                .any(|p| p.user_id == user_id && p.status == PlayerStatus::Joined)
    }

    pub fn player(&self, user_id: i32) -> Option<&CampaignPlayer> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    /// Host followed by every member (all statuses), used to address notifications.
    pub fn audience(&self) -> Vec<i32> {
        std::iter::once(self.host_id)
            .chain(self.players.iter().map(|p| p.user_id))
            .collect()
    }

    pub fn into_dto(self) -> CampaignDto {
        CampaignDto {
            id: self.id,
            host_id: self.host_id,
            name: self.name,
            description: self.description,
            audio: self.config.audio,
            scenes: self.config.scenes,
            assets: self.config.assets,
            players: self.players.into_iter().map(|p| p.into_dto()).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for creating a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaignParam {
    pub host_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub config: CampaignConfig,
}

impl CreateCampaignParam {
    /// Builds parameters from the request DTO, defaulting absent blobs to `{}`.
    pub fn from_dto(host_id: i32, dto: CreateCampaignDto) -> Self {
        let defaults = CampaignConfig::default();
        Self {
            host_id,
            name: dto.name,
            description: dto.description,
            config: CampaignConfig {
                audio: dto.audio.unwrap_or(defaults.audio),
                scenes: dto.scenes.unwrap_or(defaults.scenes),
                assets: dto.assets.unwrap_or(defaults.assets),
            },
        }
    }
}

/// Parameters for updating a campaign. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCampaignParam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub audio: Option<Value>,
    pub scenes: Option<Value>,
    pub assets: Option<Value>,
}

impl From<UpdateCampaignDto> for UpdateCampaignParam {
    fn from(dto: UpdateCampaignDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            audio: dto.audio,
            scenes: dto.scenes,
            assets: dto.assets,
        }
    }
}

impl From<CampaignConfig> for UpdateCampaignParam {
    fn from(config: CampaignConfig) -> Self {
        Self {
            audio: Some(config.audio),
            scenes: Some(config.scenes),
            assets: Some(config.assets),
            ..Default::default()
        }
    }
}
