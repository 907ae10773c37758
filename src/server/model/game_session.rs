//! Game session domain models and the session lifecycle state machine.
//!
//! A session moves through four states:
//!
//! ```text
//!            start request          hot store created
//! INACTIVE ────────────────▶ STARTING ───────────────▶ ACTIVE
//!    ▲  ▲                        │                       │
//!    │  └────── rollback ────────┘                       │ end request
//!    │                                                   ▼
//!    └──────────── hot-to-cold migration done ──────── STOPPING
//! ```
//!
//! While `INACTIVE` the campaign row in the cold store is authoritative for the session's
//! configuration. In every other state the live game document in the hot store is, and
//! the session carries its reference in `live_game_id`.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::{
    model::session::{CreateGameSessionDto, GameSessionDto},
    server::error::{internal::InternalError, session::SessionError},
};

/// Capacity used when a session is created without one.
pub const DEFAULT_CAPACITY: i32 = 6;
/// Smallest accepted session capacity.
pub const MIN_CAPACITY: i32 = 1;
/// Largest accepted session capacity.
pub const MAX_CAPACITY: i32 = 32;

/// Lifecycle state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Between play; configuration lives in the cold store. Initial and terminal state.
    Inactive,
    /// Hot-storage document is being materialized.
    Starting,
    /// Live play; the hot store is authoritative.
    Active,
    /// Final live state is being migrated back to the cold store.
    Stopping,
}

impl SessionStatus {
    /// Every lifecycle state, in declaration order.
    pub const ALL: [SessionStatus; 4] = [
        SessionStatus::Inactive,
        SessionStatus::Starting,
        SessionStatus::Active,
        SessionStatus::Stopping,
    ];

    /// Value stored in the `game_session.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Starting => "STARTING",
            Self::Active => "ACTIVE",
            Self::Stopping => "STOPPING",
        }
    }

    /// The transition table.
    ///
    /// Only INACTIVE→STARTING, STARTING→ACTIVE, STARTING→INACTIVE, ACTIVE→STOPPING and
    /// STOPPING→INACTIVE are allowed. Self-edges are rejected.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        use SessionStatus::*;

        matches!(
            (self, next),
            (Inactive, Starting)
                | (Starting, Active)
                | (Starting, Inactive)
                | (Active, Stopping)
                | (Stopping, Inactive)
        )
    }

    /// Whether a session in this state must carry a live game reference.
    pub fn requires_live_game(self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SessionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| InternalError::UnknownSessionStatus(value.to_string()))
    }
}

/// A validated status change, ready to be applied as a guarded update.
///
/// Construction checks both the transition table and the live game reference
/// invariant for the target state, so a `SessionTransition` can never move a session
/// into `INACTIVE` with a reference or into a live state without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTransition {
    from: SessionStatus,
    to: SessionStatus,
    live_game_id: Option<String>,
}

impl SessionTransition {
    /// Validates an arbitrary transition.
    ///
    /// # Returns
    /// - `Ok(SessionTransition)` - Edge is allowed and the reference matches `to`
    /// - `Err(SessionError::InvalidTransition)` - Edge is not in the transition table
    /// - `Err(SessionError::LiveGameReferenceMismatch)` - Reference missing for a live
    ///   state or present for `INACTIVE`
    pub fn new(
        from: SessionStatus,
        to: SessionStatus,
        live_game_id: Option<String>,
    ) -> Result<Self, SessionError> {
        if !from.can_transition_to(to) {
            return Err(SessionError::InvalidTransition { from, to });
        }

        if to.requires_live_game() != live_game_id.is_some() {
            return Err(SessionError::LiveGameReferenceMismatch {
                status: to,
                has_reference: live_game_id.is_some(),
            });
        }

        Ok(Self {
            from,
            to,
            live_game_id,
        })
    }

    /// INACTIVE → STARTING with a freshly minted reference.
    pub fn start(live_game_id: impl Into<String>) -> Self {
        Self {
            from: SessionStatus::Inactive,
            to: SessionStatus::Starting,
            live_game_id: Some(live_game_id.into()),
        }
    }

    /// STARTING → ACTIVE once the hot store holds the document.
    pub fn activate(live_game_id: impl Into<String>) -> Self {
        Self {
            from: SessionStatus::Starting,
            to: SessionStatus::Active,
            live_game_id: Some(live_game_id.into()),
        }
    }

    /// STARTING → INACTIVE for a failed or abandoned start.
    pub fn roll_back() -> Self {
        Self {
            from: SessionStatus::Starting,
            to: SessionStatus::Inactive,
            live_game_id: None,
        }
    }

    /// ACTIVE → STOPPING on an end request.
    pub fn stop(live_game_id: impl Into<String>) -> Self {
        Self {
            from: SessionStatus::Active,
            to: SessionStatus::Stopping,
            live_game_id: Some(live_game_id.into()),
        }
    }

    /// STOPPING → INACTIVE once the live state is back in the cold store.
    pub fn finish() -> Self {
        Self {
            from: SessionStatus::Stopping,
            to: SessionStatus::Inactive,
            live_game_id: None,
        }
    }

    pub fn from(&self) -> SessionStatus {
        self.from
    }

    pub fn to(&self) -> SessionStatus {
        self.to
    }

    pub fn live_game_id(&self) -> Option<&str> {
        self.live_game_id.as_deref()
    }
}

/// A scheduled or recorded instance of play for a campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub id: i32,
    pub campaign_id: i32,
    /// User hosting the session (the campaign host).
    pub host_id: i32,
    pub name: String,
    pub status: SessionStatus,
    /// Hot-storage reference, set while the session is live.
    pub live_game_id: Option<String>,
    /// Maximum number of joined players, the host excluded.
    pub capacity: i32,
    /// Joined user ids, in join order.
    pub roster: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    /// When `status` last changed; the repair job measures state age from here.
    pub status_changed_at: DateTime<Utc>,
}

impl GameSession {
    /// Converts an entity model and its roster to a domain model at the repository boundary.
    ///
    /// Rows violating the live game reference invariant are still returned so the repair
    /// job can act on them, but the violation is logged.
    ///
    /// # Returns
    /// - `Ok(GameSession)` - The converted session
    /// - `Err(InternalError::UnknownSessionStatus)` - Stored status is not a lifecycle state
    pub fn from_entity(
        entity: entity::game_session::Model,
        roster: Vec<i32>,
    ) -> Result<Self, InternalError> {
        let status = SessionStatus::from_str(&entity.status)?;

        if status.requires_live_game() != entity.live_game_id.is_some() {
            tracing::warn!(
                "Session {} is {} but live game reference is {:?}",
                entity.id,
                status,
                entity.live_game_id
            );
        }

        Ok(Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            host_id: entity.host_id,
            name: entity.name,
            status,
            live_game_id: entity.live_game_id,
            capacity: entity.capacity,
            roster,
            created_at: entity.created_at,
            started_at: entity.started_at,
            stopped_at: entity.stopped_at,
            status_changed_at: entity.status_changed_at,
        })
    }

    pub fn is_host(&self, user_id: i32) -> bool {
        self.host_id == user_id
    }

    pub fn has_joined(&self, user_id: i32) -> bool {
        self.roster.contains(&user_id)
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.capacity as usize
    }

    /// Fails with `WrongStatus` unless the session is in `expected`.
    pub fn require_status(&self, expected: SessionStatus) -> Result<(), SessionError> {
        if self.status != expected {
            return Err(SessionError::WrongStatus {
                session_id: self.id,
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    pub fn into_dto(self) -> GameSessionDto {
        GameSessionDto {
            id: self.id,
            campaign_id: self.campaign_id,
            host_id: self.host_id,
            name: self.name,
            status: self.status.as_str().to_string(),
            live_game_id: self.live_game_id,
            capacity: self.capacity,
            roster: self.roster,
            created_at: self.created_at,
            started_at: self.started_at,
            stopped_at: self.stopped_at,
            status_changed_at: self.status_changed_at,
        }
    }
}

/// Parameters for creating a session for a campaign.
#[derive(Debug, Clone)]
pub struct CreateGameSessionParam {
    pub campaign_id: i32,
    pub host_id: i32,
    pub name: String,
    pub capacity: i32,
}

impl CreateGameSessionParam {
    /// Builds parameters from the request DTO, defaulting the capacity.
    pub fn from_dto(campaign_id: i32, host_id: i32, dto: CreateGameSessionDto) -> Self {
        Self {
            campaign_id,
            host_id,
            name: dto.name,
            capacity: dto.capacity.unwrap_or(DEFAULT_CAPACITY),
        }
    }

    /// Validates the requested capacity.
    ///
    /// # Returns
    /// - `Ok(())` - Capacity within `MIN_CAPACITY..=MAX_CAPACITY`
    /// - `Err(SessionError::InvalidCapacity)` - Capacity out of range
    pub fn validate(&self) -> Result<(), SessionError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(SessionError::InvalidCapacity {
                value: self.capacity,
                min: MIN_CAPACITY,
                max: MAX_CAPACITY,
            });
        }
        Ok(())
    }
}
