//! Live game documents held by the hot store.
//!
//! These types double as the JSON wire format of the live-game service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    model::live_game::{LiveGameDto, SeatDto, UpdateLiveGameDto},
    server::model::campaign::CampaignConfig,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub seat: u32,
    pub user_id: i32,
}

impl Seat {
    /// Numbers seats in list order starting at 0.
    pub fn assign(user_ids: impl IntoIterator<Item = i32>) -> Vec<Seat> {
        user_ids
            .into_iter()
            .enumerate()
            .map(|(seat, user_id)| Seat {
                seat: seat as u32,
                user_id,
            })
            .collect()
    }
}

/// Live in-session state of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveGame {
    /// Equal to the session's `live_game_id`.
    pub id: String,
    pub session_id: i32,
    pub campaign_id: i32,
    pub host_id: i32,
    pub seating: Vec<Seat>,
    pub active_display: Option<Value>,
    pub audio: Value,
    pub scenes: Value,
    pub assets: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LiveGame {
    /// The configuration to write back into the campaign when the session ends.
    pub fn config(&self) -> CampaignConfig {
        CampaignConfig {
            audio: self.audio.clone(),
            scenes: self.scenes.clone(),
            assets: self.assets.clone(),
        }
    }

    /// Applies a patch in place and bumps `updated_at`.
    pub fn apply(&mut self, patch: LiveGamePatch) {
        if patch.clear_active_display {
            self.active_display = None;
        } else if let Some(display) = patch.active_display {
            self.active_display = Some(display);
        }
        if let Some(seating) = patch.seating {
            self.seating = seating;
        }
        if let Some(audio) = patch.audio {
            self.audio = audio;
        }
        if let Some(scenes) = patch.scenes {
            self.scenes = scenes;
        }
        self.updated_at = Utc::now();
    }

    pub fn into_dto(self) -> LiveGameDto {
        LiveGameDto {
            id: self.id,
            session_id: self.session_id,
            campaign_id: self.campaign_id,
            host_id: self.host_id,
            seating: self
                .seating
                .into_iter()
                .map(|s| SeatDto {
                    seat: s.seat,
                    user_id: s.user_id,
                })
                .collect(),
            active_display: self.active_display,
            audio: self.audio,
            scenes: self.scenes,
            assets: self.assets,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Seed for materializing a live game when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLiveGame {
    pub id: String,
    pub session_id: i32,
    pub campaign_id: i32,
    pub host_id: i32,
    pub seating: Vec<Seat>,
    pub audio: Value,
    pub scenes: Value,
    pub assets: Value,
}

impl NewLiveGame {
    pub fn into_live_game(self, now: DateTime<Utc>) -> LiveGame {
        LiveGame {
            id: self.id,
            session_id: self.session_id,
            campaign_id: self.campaign_id,
            host_id: self.host_id,
            seating: self.seating,
            active_display: None,
            audio: self.audio,
            scenes: self.scenes,
            assets: self.assets,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a live game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveGamePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_display: Option<Value>,
    #[serde(default)]
    pub clear_active_display: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seating: Option<Vec<Seat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenes: Option<Value>,
}

impl From<UpdateLiveGameDto> for LiveGamePatch {
    fn from(dto: UpdateLiveGameDto) -> Self {
        Self {
            active_display: dto.active_display,
            clear_active_display: dto.clear_active_display,
            seating: dto.seating.map(Seat::assign),
            audio: dto.audio,
            scenes: dto.scenes,
        }
    }
}
